/// Defines a signed fixed-precision scalar stored as `$primitive` and covering `[-$max, $max]`.
///
/// The generated type is `#[repr(transparent)]`, so it can be marked [`Pod`](bytemuck::Pod) by the caller.
#[macro_export]
macro_rules! impl_fixed_precision {
    (name: $name:ident, doc: $docstr:expr, primitive: $primitive:ty, float: $float:ty, max: $max:literal) => {
        #[doc = $docstr]
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[repr(transparent)]
        pub struct $name(pub $primitive);

        impl $name {
            pub const RESOLUTION: $float = <$primitive>::MAX as $float;
            pub const PRECISION: $float = $max / Self::RESOLUTION;
            pub const MIN: Self = Self(-<$primitive>::MAX);
            pub const MAX: Self = Self(<$primitive>::MAX);
            pub const ZERO: Self = Self(0);
        }

        impl From<$name> for $float {
            #[inline]
            fn from(x: $name) -> Self {
                x.0 as $float * $name::PRECISION
            }
        }

        impl From<$float> for $name {
            #[inline]
            fn from(s: $float) -> Self {
                $name((Self::RESOLUTION * s.min($max).max(-$max)) as $primitive)
            }
        }
    };
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
