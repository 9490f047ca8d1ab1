//! Utility macros.

/// Implements a binary operator for all combinations of owned and borrowed
/// operands. A leading `<T>` makes the implementation generic over
/// [`Scalar`](crate::num::Scalar) types.
macro_rules! impl_binop {
    (<$g:ident> $op:ident, $method:ident, $tl:ty, $tr:ty, $to:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl_binop!(@impl [$g: $crate::num::Scalar], $op, $method, $tl, $tr, $to, |$lhs, $rhs| $body);
    };
    ($op:ident, $method:ident, $tl:ty, $tr:ty, $to:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl_binop!(@impl [], $op, $method, $tl, $tr, $to, |$lhs, $rhs| $body);
    };
    (@impl [$($generics:tt)*], $op:ident, $method:ident, $tl:ty, $tr:ty, $to:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for &'a $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for &$tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                ::std::ops::$op::$method(self, &rhs)
            }
        }

        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                ::std::ops::$op::$method(&self, rhs)
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                ::std::ops::$op::$method(&self, &rhs)
            }
        }
    };
}

macro_rules! impl_unary_op {
    (<$g:ident> $op:ident, $method:ident, $t:ty, $to:ty, |$this:ident| $body:block) => {
        impl<$g: $crate::num::Scalar> ::std::ops::$op for &$t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                let $this = self;
                $body
            }
        }

        impl<$g: $crate::num::Scalar> ::std::ops::$op for $t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                ::std::ops::$op::$method(&self)
            }
        }
    };
}

macro_rules! impl_binop_assign {
    (<$g:ident> $op:ident, $method:ident, $tl:ty, $tr:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl<$g: $crate::num::Scalar> ::std::ops::$op<&$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: &$tr) {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$g: $crate::num::Scalar> ::std::ops::$op<$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: $tr) {
                ::std::ops::$op::$method(self, &rhs);
            }
        }
    };
}

/// Implements `scalar * value` for each concrete scalar type, forwarding to
/// `value * scalar`. This cannot be done generically because the scalar is the
/// left operand.
macro_rules! impl_scalar_lhs_mul {
    ($generic:ident) => {
        impl_scalar_lhs_mul!($generic, f32, f64, ::gmath_fixed::Fixed);
    };
    ($generic:ident, $($scalar:ty),+) => {
        $(
            impl_binop!(Mul, mul, $scalar, $generic<$scalar>, $generic<$scalar>, |a, b| {
                ::std::ops::Mul::mul(b, *a)
            });
        )+
    };
}

macro_rules! impl_abs_diff_eq {
    ($t:ident, |$arg1:ident, $arg2:ident, $arg3:ident| $body:block) => {
        impl<T: $crate::num::Scalar> ::approx::AbsDiffEq for $t<T> {
            type Epsilon = T;

            fn default_epsilon() -> Self::Epsilon {
                T::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                $body
            }
        }
    };
}

macro_rules! impl_relative_eq {
    ($t:ident, |$arg1:ident, $arg2:ident, $arg3:ident, $arg4:ident| $body:block) => {
        impl<T: $crate::num::Scalar> ::approx::RelativeEq for $t<T> {
            fn default_max_relative() -> Self::Epsilon {
                T::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                let $arg4 = max_relative;
                $body
            }
        }
    };
}

/// Implements [`Pod`](bytemuck::Pod) and [`Zeroable`](bytemuck::Zeroable) for
/// a `#[repr(C)]` type whose fields are all of the scalar type `T`.
macro_rules! impl_pod {
    ($($t:ident),+ $(,)?) => {
        $(
            // SAFETY: The type is `repr(C)` and consists solely of fields of
            // type `T: Pod`, so it has no padding and every bit pattern is
            // valid.
            unsafe impl<T: $crate::num::Scalar> ::bytemuck::Zeroable for $t<T> {}
            // SAFETY: See above.
            unsafe impl<T: $crate::num::Scalar> ::bytemuck::Pod for $t<T> {}
        )+
    };
}

/// Defines the per-precision aliases for a generic type.
macro_rules! define_precision_aliases {
    ($generic:ident => $f32_alias:ident, $f64_alias:ident, $fixed_alias:ident) => {
        #[doc = concat!("A [`", stringify!($generic), "`] of `f32`.")]
        pub type $f32_alias = $generic<f32>;
        #[doc = concat!("A [`", stringify!($generic), "`] of `f64`.")]
        pub type $f64_alias = $generic<f64>;
        #[doc = concat!("A [`", stringify!($generic), "`] of Q16.16 [`Fixed`](crate::Fixed).")]
        pub type $fixed_alias = $generic<::gmath_fixed::Fixed>;
    };
}
