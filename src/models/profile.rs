use serde::{Deserialize, Serialize};

use crate::profile::capability::DeviceCapability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedProfileView {
    #[serde(with = "base64_opt")]
    pub name: Option<Vec<u8>>,
    #[serde(with = "base64_opt")]
    pub about: Option<Vec<u8>>,
    #[serde(with = "base64_opt")]
    pub about_emoji: Option<Vec<u8>>,
    pub avatar: Option<String>,
    #[serde(with = "base64_opt")]
    pub phone_number_sharing: Option<Vec<u8>>,
    #[serde(with = "base64_opt", skip_serializing_if = "Option::is_none", default)]
    pub payment_address: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnversionedProfileView {
    #[serde(with = "base64_opt")]
    pub identity_key: Option<Vec<u8>>,
    #[serde(with = "base64_opt", skip_serializing_if = "Option::is_none", default)]
    pub unidentified_access: Option<Vec<u8>>,
    pub unrestricted_unidentified_access: bool,
    pub capabilities: Vec<DeviceCapability>,
    #[serde(default)]
    pub badges: Vec<BadgeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDescriptor {
    pub id: String,
    pub category: String,
    pub name: String,
    pub description: String,
    pub sprites6: Vec<String>,
    pub svg: String,
    pub svgs: Vec<BadgeSvgView>,
    #[serde(flatten)]
    pub self_state: Option<SelfBadgeState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSvgView {
    pub light: String,
    pub dark: String,
}

/// Extra badge fields shown only to the badge holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfBadgeState {
    pub expiration: i64,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialResponseView {
    #[serde(with = "base64_bytes")]
    pub credential: Vec<u8>,
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

mod base64_opt {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&BASE64_STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|value| BASE64_STANDARD.decode(value))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_address_omitted_when_absent() {
        let view = VersionedProfileView {
            name: Some(vec![1, 2, 3]),
            about: None,
            about_emoji: None,
            avatar: Some("profiles/abc".to_string()),
            phone_number_sharing: None,
            payment_address: None,
        };
        let json = serde_json::to_value(&view).expect("serializes");
        assert_eq!(json["name"], "AQID");
        assert!(json["about"].is_null());
        assert!(json.get("paymentAddress").is_none());
    }

    #[test]
    fn self_state_flattens_into_badge() {
        let badge = BadgeDescriptor {
            id: "boost".to_string(),
            category: "donor".to_string(),
            name: "Boost".to_string(),
            description: String::new(),
            sprites6: Vec::new(),
            svg: "boost.svg".to_string(),
            svgs: Vec::new(),
            self_state: Some(SelfBadgeState {
                expiration: 42,
                visible: false,
            }),
        };
        let json = serde_json::to_value(&badge).expect("serializes");
        assert_eq!(json["expiration"], 42);
        assert_eq!(json["visible"], false);
    }
}
