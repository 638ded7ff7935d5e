use serde::{Deserialize, Serialize};

/// Which size of a profile photo a resource points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSizeSpec {
    Small,
    Full,
}

impl PhotoSizeSpec {
    /// Nominal square edge in pixels
    pub fn edge(&self) -> i32 {
        match self {
            PhotoSizeSpec::Small => 80,
            PhotoSizeSpec::Full => 640,
        }
    }
}

/// Location of a peer photo in cloud storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CloudPeerPhotoResource {
    pub datacenter_id: i32,
    pub photo_id: i64,
    pub size_spec: PhotoSizeSpec,
}

/// One rendition of an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRepresentation {
    pub width: i32,
    pub height: i32,
    pub resource: CloudPeerPhotoResource,
    /// Stripped inline thumbnail, usable before the resource is fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate_thumbnail_data: Option<Vec<u8>>,
    #[serde(default)]
    pub has_video: bool,
    #[serde(default)]
    pub is_personal: bool,
}

impl ImageRepresentation {
    pub fn square(
        resource: CloudPeerPhotoResource,
        immediate_thumbnail_data: Option<Vec<u8>>,
        has_video: bool,
        is_personal: bool,
    ) -> Self {
        let edge = resource.size_spec.edge();
        Self {
            width: edge,
            height: edge,
            resource,
            immediate_thumbnail_data,
            has_video,
            is_personal,
        }
    }
}
