//! The [`Resource`] trait and the `resource!` macro that defines resources.
//!
//! A resource groups related endpoints. Every public method on a resource
//! builds a [`CallSpec`](crate::CallSpec) and nothing else; the macro only
//! accepts methods of that shape. [`Resource`] is sealed, so the set of
//! resources is closed to this crate.

use crate::client::XingApi;
use crate::contract::ResourceDescriptor;

pub(crate) mod sealed {
    pub trait Sealed {}
}

pub trait Resource: sealed::Sealed + Sized {
    /// Binds a new handle to `api`. Use [`XingApi::resource`] instead.
    fn from_api(api: XingApi) -> Self;

    /// Describes the resource's shape for contract validation.
    fn descriptor() -> ResourceDescriptor;
}

/// Defines a sealed resource struct holding a [`XingApi`] handle.
///
/// Each method must be `pub fn name(&self, ..) -> CallSpec<RT, ET>`. The
/// generated descriptor records the declared return type of every method.
macro_rules! resource {
    (
        $(#[$struct_meta:meta])*
        pub struct $name:ident;

        $(
            $(#[$fn_meta:meta])*
            pub fn $method:ident(&$self:ident $(, $arg:ident: $arg_ty:ty)* $(,)?)
                -> CallSpec<$rt:ty, $et:ty> $body:block
        )*
    ) => {
        $(#[$struct_meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            api: $crate::client::XingApi,
        }

        impl $crate::resource::sealed::Sealed for $name {}

        impl $crate::resource::Resource for $name {
            fn from_api(api: $crate::client::XingApi) -> Self {
                Self { api }
            }

            fn descriptor() -> $crate::contract::ResourceDescriptor {
                $crate::contract::ResourceDescriptor::sealed(stringify!($name))
                    $(
                        .with_method($crate::contract::MethodDescriptor::returning::<
                            $crate::call::CallSpec<$rt, $et>,
                        >(
                            stringify!($method),
                            $crate::contract::Visibility::Public,
                        ))
                    )*
            }
        }

        impl $name {
            $(
                $(#[$fn_meta])*
                pub fn $method(&$self $(, $arg: $arg_ty)*) -> $crate::call::CallSpec<$rt, $et> $body
            )*
        }
    };
}

pub(crate) use resource;
