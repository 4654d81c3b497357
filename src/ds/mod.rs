mod conf;
mod fields;
mod num;

pub use self::conf::Conf;
pub(crate) use self::conf::join_path;
pub use fields::Fields;
pub use num::{IntoIntError, Number};
