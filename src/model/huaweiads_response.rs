use serde::{Deserialize, Serialize};

/// HuaweiAds 应答
/// 适配层本身不解析应答，仅在 `--forward` 模式下由 exchange_client 原样解码后透传。
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HuaweiAdsResponse {
    #[serde(default)]
    pub retcode: i32,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub multiad: Vec<Ad30>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Ad30 {
    #[serde(default)]
    pub adtype: i32,
    #[serde(default)]
    pub slotid: String,
    #[serde(default)]
    pub retcode30: i32,
    #[serde(default)]
    pub content: Vec<Content>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(default)]
    pub contentid: String,
    #[serde(default)]
    pub interactiontype: i32,
    #[serde(default)]
    pub creativetype: i32,
    #[serde(rename = "metaData", default)]
    pub meta_data: MetaData,
    #[serde(default)]
    pub monitor: Vec<Monitor>,
    #[serde(default)]
    pub cur: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MetaData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageInfo", default)]
    pub image_info: Vec<ImageInfo>,
    #[serde(default)]
    pub icon: Vec<ImageInfo>,
    #[serde(rename = "clickUrl", default)]
    pub click_url: String,
    #[serde(default)]
    pub intent: String,
    #[serde(rename = "videoInfo", default)]
    pub video_info: VideoInfo,
    #[serde(rename = "apkInfo", default)]
    pub apk_info: ApkInfo,
    #[serde(default)]
    pub duration: i64,
    #[serde(rename = "mediaFile", default)]
    pub media_file: MediaFile,
}

/// 图片与图标共用同一结构
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ImageInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub height: i64,
    #[serde(rename = "fileSize", default)]
    pub file_size: i64,
    #[serde(default)]
    pub sha256: String,
    #[serde(rename = "imageType", default)]
    pub image_type: String,
    #[serde(default)]
    pub width: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct VideoInfo {
    #[serde(rename = "videoDownloadUrl", default)]
    pub video_download_url: String,
    #[serde(rename = "videoDuration", default)]
    pub video_duration: i32,
    #[serde(rename = "videoFileSize", default)]
    pub video_file_size: i32,
    #[serde(default)]
    pub sha256: String,
    #[serde(rename = "videoRatio", default)]
    pub video_ratio: f32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ApkInfo {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "fileSize", default)]
    pub file_size: i64,
    #[serde(default)]
    pub sha256: String,
    #[serde(rename = "packageName", default)]
    pub package_name: String,
    #[serde(rename = "secondUrl", default)]
    pub second_url: String,
    #[serde(rename = "appName", default)]
    pub app_name: String,
    #[serde(rename = "versionName", default)]
    pub version_name: String,
    #[serde(rename = "appDesc", default)]
    pub app_desc: String,
    #[serde(rename = "appIcon", default)]
    pub app_icon: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MediaFile {
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(rename = "fileSize", default)]
    pub file_size: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sha256: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Monitor {
    #[serde(rename = "eventType", default)]
    pub event_type: String,
    #[serde(default)]
    pub url: Vec<String>,
}
