//! Wire messages of the `ImageInterface` gRPC service.
//!
//! Declared with `prost` derives in the shape `prost-build` emits for
//! `image_interface.proto`, plus conversions into the image store types.

use crate::image_store::{DisparityImage, Gpios, Image, ImageSet, PixelEncoding, Timestamp};

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Time {
    #[prost(int32, tag = "1")]
    pub sec: i32,
    #[prost(int32, tag = "2")]
    pub nsec: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GpioState {
    #[prost(uint32, tag = "1")]
    pub inputs: u32,
    #[prost(uint32, tag = "2")]
    pub outputs: u32,
    #[prost(uint32, tag = "3")]
    pub values: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WireImage {
    #[prost(message, optional, tag = "1")]
    pub timestamp: ::core::option::Option<Time>,
    #[prost(uint32, tag = "2")]
    pub height: u32,
    #[prost(uint32, tag = "3")]
    pub width: u32,
    #[prost(float, tag = "4")]
    pub focal_length: f32,
    #[prost(float, tag = "5")]
    pub principal_point_u: f32,
    #[prost(float, tag = "6")]
    pub principal_point_v: f32,
    #[prost(string, tag = "7")]
    pub encoding: ::prost::alloc::string::String,
    #[prost(bool, tag = "8")]
    pub is_bigendian: bool,
    #[prost(uint32, tag = "9")]
    pub step: u32,
    #[prost(bytes = "vec", tag = "10")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(float, tag = "11")]
    pub exposure_time: f32,
    #[prost(float, tag = "12")]
    pub gain: f32,
    #[prost(float, tag = "13")]
    pub noise: f32,
    #[prost(float, tag = "14")]
    pub out1_reduction: f32,
    #[prost(float, tag = "15")]
    pub brightness: f32,
    #[prost(message, optional, tag = "16")]
    pub gpios: ::core::option::Option<GpioState>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WireDisparityImage {
    #[prost(message, optional, tag = "1")]
    pub image: ::core::option::Option<WireImage>,
    #[prost(float, tag = "2")]
    pub scale: f32,
    #[prost(float, tag = "3")]
    pub offset: f32,
    #[prost(float, tag = "4")]
    pub invalid_data_value: f32,
    #[prost(float, tag = "5")]
    pub baseline: f32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WireImageSet {
    #[prost(message, optional, tag = "1")]
    pub timestamp: ::core::option::Option<Time>,
    #[prost(message, optional, tag = "2")]
    pub left: ::core::option::Option<WireImage>,
    #[prost(message, optional, tag = "3")]
    pub right: ::core::option::Option<WireImage>,
    #[prost(message, optional, tag = "4")]
    pub disparity: ::core::option::Option<WireDisparityImage>,
    #[prost(message, optional, tag = "5")]
    pub confidence: ::core::option::Option<WireImage>,
    #[prost(message, optional, tag = "6")]
    pub disparity_error: ::core::option::Option<WireImage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum BinningMethod {
    Average = 0,
    Min = 1,
    Max = 2,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct MeshOptions {
    #[prost(uint32, tag = "1")]
    pub max_points: u32,
    #[prost(enumeration = "BinningMethod", tag = "2")]
    pub binning_method: i32,
    #[prost(bool, tag = "3")]
    pub watertight: bool,
    #[prost(bool, tag = "4")]
    pub textured: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ImageSetRequest {
    #[prost(bool, tag = "1")]
    pub left_enabled: bool,
    #[prost(bool, tag = "2")]
    pub right_enabled: bool,
    #[prost(bool, tag = "3")]
    pub disparity_enabled: bool,
    #[prost(bool, tag = "4")]
    pub confidence_enabled: bool,
    #[prost(bool, tag = "5")]
    pub disparity_error_enabled: bool,
    #[prost(bool, tag = "6")]
    pub mesh_enabled: bool,
    #[prost(message, optional, tag = "7")]
    pub mesh_options: ::core::option::Option<MeshOptions>,
    #[prost(bool, tag = "8")]
    pub color: bool,
}

impl From<Time> for Timestamp {
    fn from(t: Time) -> Self {
        Timestamp {
            sec: t.sec,
            nsec: t.nsec,
        }
    }
}

impl From<GpioState> for Gpios {
    fn from(g: GpioState) -> Self {
        Gpios {
            inputs: g.inputs,
            outputs: g.outputs,
            values: g.values,
        }
    }
}

impl From<WireImage> for Image {
    fn from(w: WireImage) -> Self {
        Image {
            encoding: PixelEncoding::from_label(&w.encoding),
            width: w.width,
            height: w.height,
            step: w.step,
            is_bigendian: w.is_bigendian,
            data: w.data,
            gpios: w.gpios.map(Gpios::from).unwrap_or_default(),
            focal_length: w.focal_length,
            principal_point_u: w.principal_point_u,
            principal_point_v: w.principal_point_v,
            exposure_time: w.exposure_time,
            gain: w.gain,
            noise: w.noise,
            out1_reduction: w.out1_reduction,
            brightness: w.brightness,
        }
    }
}

impl From<WireDisparityImage> for DisparityImage {
    fn from(w: WireDisparityImage) -> Self {
        DisparityImage {
            image: w.image.unwrap_or_default().into(),
            baseline: w.baseline,
            scale: w.scale,
            offset: w.offset,
            invalid_data_value: w.invalid_data_value,
        }
    }
}

impl From<WireImageSet> for ImageSet {
    fn from(w: WireImageSet) -> Self {
        ImageSet {
            timestamp: w.timestamp.map(Timestamp::from).unwrap_or_default(),
            left: w.left.map(Image::from),
            right: w.right.map(Image::from),
            disparity: w.disparity.map(DisparityImage::from),
            confidence: w.confidence.map(Image::from),
            disparity_error: w.disparity_error.map(Image::from),
        }
    }
}
