// src/bidding/adslot.rs

use tracing::debug;

use crate::error::ImpressionError;
use crate::model::credential::PublishersCredential;
use crate::model::huaweiads::{AdSlot30, Format};
use crate::openrtb::native::NativeRequest;
use crate::openrtb::request::{Banner, Imp, Native, Video};

/// HuaweiAds 广告类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AdType {
    Splash = 1,
    MagazineLock = 2,
    Native = 3,
    Rewarded = 7,
    Banner = 8,
    Interstitial = 12,
    Audio = 17,
    Roll = 60,
}

impl AdType {
    /// 媒体配置的 adtype 字符串（忽略大小写），无法识别时按 banner 处理
    pub fn from_declared(adtype: &str) -> Self {
        match adtype.to_lowercase().as_str() {
            "banner" => AdType::Banner,
            "native" => AdType::Native,
            "rewarded" => AdType::Rewarded,
            "interstitial" => AdType::Interstitial,
            "roll" => AdType::Roll,
            "splash" => AdType::Splash,
            "magazinelock" => AdType::MagazineLock,
            "audio" => AdType::Audio,
            _ => AdType::Banner,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// imp 中实际出现的素材类型
enum Creative<'a> {
    Banner(&'a Banner),
    Native(&'a Native),
    Video(&'a Video),
}

/// banner > native > video > audio 依次判断，audio 与空 imp 直接失败
fn creative_of(imp: &Imp) -> Result<Creative<'_>, ImpressionError> {
    if let Some(banner) = &imp.banner {
        Ok(Creative::Banner(banner))
    } else if let Some(native) = &imp.native {
        Ok(Creative::Native(native))
    } else if let Some(video) = &imp.video {
        Ok(Creative::Video(video))
    } else if imp.audio.is_some() {
        Err(ImpressionError::UnsupportedCreative)
    } else {
        Err(ImpressionError::MissingCreative)
    }
}

const BANNER_AD_TYPES: &[AdType] = &[AdType::Banner, AdType::Interstitial];
const NATIVE_AD_TYPES: &[AdType] = &[AdType::Native];
const VIDEO_AD_TYPES: &[AdType] = &[
    AdType::Banner,
    AdType::Interstitial,
    AdType::Rewarded,
    AdType::Roll,
];

/// 各素材类型允许对应的 HuaweiAds 广告类型
fn allowed_ad_types(creative: &Creative<'_>) -> (&'static str, &'static [AdType]) {
    match creative {
        Creative::Banner(_) => ("banner", BANNER_AD_TYPES),
        Creative::Native(_) => ("native", NATIVE_AD_TYPES),
        Creative::Video(_) => ("video", VIDEO_AD_TYPES),
    }
}

/// **为单个 imp 构造广告位**
pub fn build_ad_slot(credential: &PublishersCredential, imp: &Imp) -> Result<AdSlot30, ImpressionError> {
    let adtype = AdType::from_declared(&credential.adtype);
    let creative = creative_of(imp)?;

    let (creative_name, allowed) = allowed_ad_types(&creative);
    if !allowed.contains(&adtype) {
        return Err(ImpressionError::AdTypeMismatch {
            creative: creative_name,
            adtype: credential.adtype.clone(),
        });
    }

    let slot = AdSlot30 {
        slotid: credential.slotid.clone(),
        adtype: adtype.code(),
        test: i32::from(credential.is_test_authorization()),
        ..Default::default()
    };
    let slot = match creative {
        Creative::Banner(banner) => banner_format(slot, banner),
        Creative::Native(native) => native_format(slot, native)?,
        Creative::Video(video) => video_format(slot, adtype, video)?,
    };
    debug!(slotid = %slot.slotid, adtype = slot.adtype, creative = creative_name, "ad slot built");
    Ok(slot)
}

/// w/h 同时存在才复制；format 中宽或高为 0 的尺寸丢弃
fn banner_format(slot: AdSlot30, banner: &Banner) -> AdSlot30 {
    let (w, h) = match (banner.w, banner.h) {
        (Some(w), Some(h)) => (w, h),
        _ => (0, 0),
    };
    let format = banner
        .format
        .iter()
        .filter(|f| f.w != 0 && f.h != 0)
        .map(|f| Format { w: f.w, h: f.h })
        .collect();
    AdSlot30 { w, h, format, ..slot }
}

/// native 素材分类结果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NativeAssetSummary {
    pub videos: usize,
    pub main_images: usize,
    pub w: i64,
    pub h: i64,
}

/// 单次扫描所有 asset：统计视频与主图数量，宽高取最后一个带尺寸的主图
pub fn summarize_assets(native: &NativeRequest) -> NativeAssetSummary {
    let mut summary = NativeAssetSummary::default();
    for asset in &native.assets {
        if asset.video.is_some() {
            summary.videos += 1;
            continue;
        }
        let Some(img) = asset.img.as_ref().filter(|img| img.is_main()) else {
            continue;
        };
        summary.main_images += 1;
        if img.w != 0 && img.h != 0 {
            summary.w = img.w;
            summary.h = img.h;
        } else if img.wmin != 0 && img.hmin != 0 {
            summary.w = img.wmin;
            summary.h = img.hmin;
        }
    }
    summary
}

/// 903 视频 > 904 多图 > 901 单图 > 913/914
pub fn detailed_creative_types(summary: &NativeAssetSummary) -> Vec<String> {
    let codes = if summary.videos >= 1 {
        vec!["903"]
    } else if summary.main_images > 1 {
        vec!["904"]
    } else if summary.main_images == 1 {
        vec!["901"]
    } else {
        vec!["913", "914"]
    };
    codes.into_iter().map(String::from).collect()
}

fn native_format(slot: AdSlot30, native: &Native) -> Result<AdSlot30, ImpressionError> {
    if native.request.is_empty() {
        return Err(ImpressionError::NativeMarkupEmpty);
    }
    let payload: NativeRequest =
        serde_json::from_str(&native.request).map_err(ImpressionError::NativeMarkupInvalid)?;
    let summary = summarize_assets(&payload);
    Ok(AdSlot30 {
        w: summary.w,
        h: summary.h,
        detailed_creative_type_list: detailed_creative_types(&summary),
        ..slot
    })
}

/// roll 广告必须提供 maxduration，作为 totalDuration
fn video_format(slot: AdSlot30, adtype: AdType, video: &Video) -> Result<AdSlot30, ImpressionError> {
    let total_duration = if adtype == AdType::Roll {
        match video.maxduration {
            Some(d) if d > 0 => i32::try_from(d).unwrap_or(i32::MAX),
            _ => return Err(ImpressionError::RollDurationMissing),
        }
    } else {
        0
    };
    Ok(AdSlot30 {
        w: video.w.unwrap_or_default(),
        h: video.h.unwrap_or_default(),
        total_duration,
        ..slot
    })
}
