mod access_flags;
mod extent;
mod format;
mod init_data;
mod linear_buffer;
mod name;
mod resource_desc;
mod texture;
mod validate;

pub use access_flags::*;
pub use extent::*;
pub use format::*;
pub use init_data::*;
pub use linear_buffer::*;
pub use name::*;
pub use resource_desc::*;
pub use texture::*;
pub use validate::*;
