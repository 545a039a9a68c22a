pub mod config;
pub mod error;
pub mod ir;

pub use config::{CamelCaseOptions, ClientConfig, DtsgenConfig, WrapperConfig};
pub use error::{DtsgenError, Result};
pub use ir::{
    split_generic_name, Controller, EnumDef, EnumValue, Member, Method, Model, SourceFile,
};
