//! Descriptions of GPU visible resources: linear buffers and textures, together with the bind, access and allocation
//! flags that steer how an allocation manager backs them. Everything in here is plain, freely copyable metadata.

pub mod descriptor;
