// src/model/credential.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ImpressionError;
use crate::openrtb::null_as_default;
use crate::openrtb::request::Imp;

/// 媒体在华为侧的鉴权信息，每个 imp 单独解析，不缓存
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishersCredential {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slotid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adtype: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisherid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signkey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyid: String,
    #[serde(
        rename = "isTestAuthorization",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub is_test_authorization: String,
}

impl PublishersCredential {
    pub fn is_test_authorization(&self) -> bool {
        self.is_test_authorization == "true"
    }

    /// 按 slotid, adtype, publisherid, signkey, keyid 的顺序检查，返回第一个为空的字段
    pub fn validate(self) -> Result<Self, ImpressionError> {
        let required = [
            ("slotid", &self.slotid),
            ("adtype", &self.adtype),
            ("publisherid", &self.publisherid),
            ("signkey", &self.signkey),
            ("keyid", &self.keyid),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.is_empty()) {
            return Err(ImpressionError::CredentialIncomplete(*field));
        }
        Ok(self)
    }
}

/// **鉴权信息来源**
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, imp: &Imp) -> Result<PublishersCredential, ImpressionError>;
}

/// imp.ext 的外层包装：`{"bidder": {...}}`
#[derive(Deserialize, Debug)]
struct ExtImpBidder {
    bidder: Value,
}

/// 从 imp.ext.bidder 解析鉴权信息（线上默认）
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpExtCredentialResolver;

impl CredentialResolver for ImpExtCredentialResolver {
    fn resolve(&self, imp: &Imp) -> Result<PublishersCredential, ImpressionError> {
        let ext = imp
            .ext
            .as_ref()
            .filter(|v| !v.is_null())
            .ok_or_else(|| ImpressionError::MalformedImpExt("imp.ext is empty".to_string()))?;
        let bidder_ext: ExtImpBidder = serde_json::from_value(ext.clone())
            .map_err(|e| ImpressionError::MalformedImpExt(e.to_string()))?;
        let credential: PublishersCredential = serde_json::from_value(bidder_ext.bidder)
            .map_err(|e| ImpressionError::MalformedImpExt(e.to_string()))?;
        credential.validate()
    }
}

/// 固定鉴权信息，仅用于联调与一致性测试，不读取 imp.ext。
/// 只有在配置里显式指定 `credential_source = "fixture"` 时才会启用。
#[derive(Debug, Clone)]
pub struct FixtureCredentialResolver {
    pub credential: PublishersCredential,
}

impl FixtureCredentialResolver {
    pub fn new(credential: PublishersCredential) -> Self {
        Self { credential }
    }
}

impl Default for FixtureCredentialResolver {
    fn default() -> Self {
        Self::new(PublishersCredential {
            slotid: "1".to_string(),
            adtype: "2".to_string(),
            publisherid: "3".to_string(),
            signkey: "4".to_string(),
            keyid: "5".to_string(),
            is_test_authorization: String::new(),
        })
    }
}

impl CredentialResolver for FixtureCredentialResolver {
    fn resolve(&self, _imp: &Imp) -> Result<PublishersCredential, ImpressionError> {
        self.credential.clone().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn imp_with_ext(ext: Value) -> Imp {
        Imp {
            id: "1".to_string(),
            ext: Some(ext),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_from_imp_ext_bidder() {
        let imp = imp_with_ext(json!({"bidder": {
            "slotid": "m8x9x3rzff", "adtype": "banner", "publisherid": "123",
            "signkey": "k", "keyid": "41", "isTestAuthorization": "true"
        }}));
        let credential = ImpExtCredentialResolver.resolve(&imp).unwrap();
        assert_eq!(credential.slotid, "m8x9x3rzff");
        assert_eq!(credential.keyid, "41");
        assert!(credential.is_test_authorization());
    }

    #[test]
    fn first_empty_field_is_reported() {
        let imp = imp_with_ext(json!({"bidder": {
            "slotid": "s", "adtype": "banner", "publisherid": "", "signkey": "", "keyid": "1"
        }}));
        let err = ImpExtCredentialResolver.resolve(&imp).unwrap_err();
        assert!(matches!(err, ImpressionError::CredentialIncomplete("publisherid")));
    }

    #[test]
    fn null_field_counts_as_empty() {
        let imp = imp_with_ext(json!({"bidder": {
            "slotid": "s", "adtype": "banner", "publisherid": "3", "signkey": "4", "keyid": null,
            "isTestAuthorization": null
        }}));
        let err = ImpExtCredentialResolver.resolve(&imp).unwrap_err();
        assert!(matches!(err, ImpressionError::CredentialIncomplete("keyid")));
    }

    #[test]
    fn missing_or_malformed_ext_is_rejected() {
        let imp = Imp::default();
        assert!(matches!(
            ImpExtCredentialResolver.resolve(&imp),
            Err(ImpressionError::MalformedImpExt(_))
        ));
        let imp = imp_with_ext(json!({"bidder": "not-an-object"}));
        assert!(matches!(
            ImpExtCredentialResolver.resolve(&imp),
            Err(ImpressionError::MalformedImpExt(_))
        ));
    }

    #[test]
    fn fixture_ignores_imp() {
        let credential = FixtureCredentialResolver::default()
            .resolve(&Imp::default())
            .unwrap();
        assert_eq!(credential.publisherid, "3");
        assert_eq!(credential.signkey, "4");
        assert!(!credential.is_test_authorization());
    }
}
