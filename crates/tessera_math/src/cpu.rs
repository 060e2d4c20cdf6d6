//! Checking that the running CPU supports the compiled SIMD backend.

use crate::simd::BACKEND_NAME;
use anyhow::{Result, bail};

/// Whether the CPU the program is running on supports the instructions
/// required by the SIMD backend this crate was compiled with. Always true
/// for the scalar backend.
pub fn is_valid_cpu() -> bool {
    #[cfg(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2",
        not(feature = "scalar")
    ))]
    {
        std::arch::is_x86_feature_detected!("sse2")
    }
    #[cfg(not(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2",
        not(feature = "scalar")
    )))]
    {
        true
    }
}

/// Checks that the running CPU supports the compiled SIMD backend.
///
/// # Errors
/// Returns an error naming the backend if the CPU lacks the required
/// instructions.
pub fn require_valid_cpu() -> Result<()> {
    if is_valid_cpu() {
        tessera_log::debug!("CPU supports the {BACKEND_NAME} backend");
        Ok(())
    } else {
        tessera_log::error!("CPU does not support the {BACKEND_NAME} backend");
        bail!("the running CPU does not support the instructions required by the {BACKEND_NAME} backend")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_running_tests_supports_compiled_backend() {
        assert!(is_valid_cpu());
        assert!(require_valid_cpu().is_ok());
    }
}
