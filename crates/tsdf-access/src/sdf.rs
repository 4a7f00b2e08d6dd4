use bytemuck::{Pod, Zeroable};

tsdf_core::impl_fixed_precision!(name: Sd16, doc: "A 16-bit truncated signed distance in the range `[-1.0, 1.0]`.", primitive: i16, float: f32, max: 1.0);

unsafe impl Zeroable for Sd16 {}
unsafe impl Pod for Sd16 {}

/// "As far *outside* of the observed surface as possible." Unobserved space reads as this value.
pub const AMBIENT_SD16: Sd16 = Sd16::MAX;

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
