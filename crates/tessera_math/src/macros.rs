//! Utility macros for implementing operators.

/// Implements a binary operator for all four combinations of owned and
/// borrowed operands, with the body written against references.
macro_rules! impl_binop {
    ($op:ident, $method:ident, $tl:ty, $tr:ty, $to:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl<'a> ::std::ops::$op<&'a $tr> for &'a $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl ::std::ops::$op<$tr> for &$tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<'a> ::std::ops::$op<&'a $tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl ::std::ops::$op<$tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! impl_unary_op {
    ($op:ident, $method:ident, $t:ty, $to:ty, |$this:ident| $body:block) => {
        impl ::std::ops::$op for &$t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                let $this = self;
                $body
            }
        }

        impl ::std::ops::$op for $t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                (&self).$method()
            }
        }
    };
}

/// Implements a compound assignment operator by delegating to the
/// corresponding binary operator.
macro_rules! impl_binop_assign {
    ($op:ident, $method:ident, $tl:ty, $tr:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl ::std::ops::$op<&$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: &$tr) {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl ::std::ops::$op<$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: $tr) {
                self.$method(&rhs);
            }
        }
    };
}

/// Implements the full set of componentwise arithmetic operators for a
/// vector type: `+ - * /` between vectors, `* /` with a scalar on the right,
/// `*` with a scalar on the left, the compound assignment forms and negation.
/// The type must provide `zip_with` and `map_with` taking closures over
/// components.
macro_rules! impl_componentwise_ops {
    ($t:ty) => {
        impl_binop!(Add, add, $t, $t, $t, |a, b| { a.zip_with(b, |a, b| a + b) });
        impl_binop!(Sub, sub, $t, $t, $t, |a, b| { a.zip_with(b, |a, b| a - b) });
        impl_binop!(Mul, mul, $t, $t, $t, |a, b| { a.zip_with(b, |a, b| a * b) });
        impl_binop!(Div, div, $t, $t, $t, |a, b| { a.zip_with(b, |a, b| a / b) });

        impl_binop!(Mul, mul, $t, f32, $t, |a, b| {
            let b = *b;
            a.map_with(|a| a * b)
        });
        impl_binop!(Div, div, $t, f32, $t, |a, b| {
            let b = *b;
            a.map_with(|a| a / b)
        });
        impl_binop!(Mul, mul, f32, $t, $t, |a, b| { b * *a });

        impl_binop_assign!(AddAssign, add_assign, $t, $t, |a, b| { *a = *a + b; });
        impl_binop_assign!(SubAssign, sub_assign, $t, $t, |a, b| { *a = *a - b; });
        impl_binop_assign!(MulAssign, mul_assign, $t, $t, |a, b| { *a = *a * b; });
        impl_binop_assign!(DivAssign, div_assign, $t, $t, |a, b| { *a = *a / b; });
        impl_binop_assign!(MulAssign, mul_assign, $t, f32, |a, b| { *a = *a * b; });
        impl_binop_assign!(DivAssign, div_assign, $t, f32, |a, b| { *a = *a / b; });

        impl_unary_op!(Neg, neg, $t, $t, |val| { val.map_with(|a| -a) });
    };
}

macro_rules! impl_abs_diff_eq {
    ($t:ty, |$arg1:ident, $arg2:ident, $arg3:ident| $body:block) => {
        impl ::approx::AbsDiffEq for $t {
            type Epsilon = f32;

            fn default_epsilon() -> Self::Epsilon {
                <f32 as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                use ::approx::AbsDiffEq as _;
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                $body
            }
        }
    };
}

macro_rules! impl_relative_eq {
    ($t:ty, |$arg1:ident, $arg2:ident, $arg3:ident, $arg4:ident| $body:block) => {
        impl ::approx::RelativeEq for $t {
            fn default_max_relative() -> Self::Epsilon {
                <f32 as ::approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                use ::approx::RelativeEq as _;
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                let $arg4 = max_relative;
                $body
            }
        }
    };
}
