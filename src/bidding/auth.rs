// src/bidding/auth.rs

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::model::credential::PublishersCredential;

type HmacSha256 = Hmac<Sha256>;

/// 签名中使用的资源路径
const REALM: &str = "ppsadx/getResult";

/// 测试鉴权使用的固定 nonce（2021/8/20 19:30）
pub const TEST_AUTHORIZATION_NONCE: &str = "1629473330823";

/// **生成 Digest 鉴权头**
///
/// - nonce: 当前毫秒时间戳，测试鉴权时固定为 `TEST_AUTHORIZATION_NONCE`
/// - 签名内容: `nonce:POST:/ppsadx/getResult`
/// - 签名密钥: `publisherid:ppsadx/getResult:signkey`
///
/// 字段顺序和分隔符必须与 HuaweiAds 完全一致。
pub fn digest_authorization(credential: &PublishersCredential, is_test_authorization: bool) -> String {
    let nonce = if is_test_authorization {
        TEST_AUTHORIZATION_NONCE.to_string()
    } else {
        Utc::now().timestamp_millis().to_string()
    };
    digest_authorization_with_nonce(credential, &nonce)
}

pub fn digest_authorization_with_nonce(credential: &PublishersCredential, nonce: &str) -> String {
    let api_key = format!("{}:{}:{}", credential.publisherid, REALM, credential.signkey);
    let message = format!("{}:POST:/{}", nonce, REALM);
    format!(
        "Digest username={},realm={},nonce={},response={},algorithm=HmacSHA256,usertype=1,keyid={}",
        credential.publisherid,
        REALM,
        nonce,
        compute_hmac_sha256(&message, &api_key),
        credential.keyid
    )
}

/// HMAC-SHA256 后转小写十六进制
pub fn compute_hmac_sha256(message: &str, sign_key: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(sign_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> PublishersCredential {
        PublishersCredential {
            slotid: "1".to_string(),
            adtype: "banner".to_string(),
            publisherid: "3".to_string(),
            signkey: "4".to_string(),
            keyid: "5".to_string(),
            is_test_authorization: "true".to_string(),
        }
    }

    // HMAC-SHA256(key = "3:ppsadx/getResult:4", message = "1629473330823:POST:/ppsadx/getResult")
    const EXPECTED_SIGNATURE: &str = "d95f4118a9619ee8d926b82c3dff822236786d1cc138a18b01282c7c38bc7fa0";

    #[test]
    fn test_authorization_header_is_deterministic() {
        let header = digest_authorization(&credential(), true);
        let expected = format!(
            "Digest username=3,realm=ppsadx/getResult,nonce=1629473330823,response={},algorithm=HmacSHA256,usertype=1,keyid=5",
            EXPECTED_SIGNATURE
        );
        assert_eq!(header, expected);
        assert_eq!(header, digest_authorization(&credential(), true));
    }

    #[test]
    fn signature_is_lowercase_hex_sha256() {
        let signature = compute_hmac_sha256("1629473330823:POST:/ppsadx/getResult", "3:ppsadx/getResult:4");
        assert_eq!(signature, EXPECTED_SIGNATURE);
    }

    #[test]
    fn live_nonce_is_current_millis() {
        let before = Utc::now().timestamp_millis();
        let header = digest_authorization(&credential(), false);
        let nonce: i64 = header
            .split(',')
            .find_map(|part| part.strip_prefix("nonce="))
            .unwrap()
            .parse()
            .unwrap();
        assert!(nonce >= before);
    }
}
