/// Implement `Display` for an enum.
///
/// Example usage:
/// ```ignore
/// enum Foo {
///     Bar(String),
///     Baz(i32),
/// }
///
/// impl_display!{ Foo, {
///     Bar(s) => s.clone(),
///     Baz(i) => format!("{}", i),
/// }}
/// ```
macro_rules! impl_display {
    ($enum:ident, {$($variant:pat => $fmt_string:expr),+$(,)* }) => {
        impl ::std::fmt::Display for $enum {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                use self::$enum::*;
                match self {
                    $(
                        $variant => write!(f, "{}", $fmt_string),
                    )+
                }
            }
        }
    };
}

/// Implements `Debug` to use `Display` instead - assumes the type has implemented `Display`.
macro_rules! impl_debug_as_display {
    ($enum:ident) => {
        impl ::std::fmt::Debug for $enum {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", self)
            }
        }
    };
}

/// Implement the `From` trait for any type, wrapping it in an enum variant.
///
/// Example usage:
/// ```ignore
/// enum MyError {
///     Bar(BarError),
///     Foo(FooError),
/// }
///
/// impl_from!(BarError, MyError::Bar);
/// impl_from!(FooError, MyError::Foo);
/// ```
macro_rules! impl_from {
    ($a:ident, $b:ident::$enum_type:ident) => {
        impl From<$a> for $b {
            fn from(e: $a) -> Self {
                $b::$enum_type(e)
            }
        }
    };
}
