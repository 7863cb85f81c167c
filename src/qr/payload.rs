//! Static QR payloads
//!
//! Static codes carry their content directly instead of a resolvable slug.
//! Each kind has its own validated field set and encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{QryftError, Result};
use crate::utils::normalize_destination;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiEncryption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::NoPass => "nopass",
        }
    }
}

impl std::str::FromStr for WifiEncryption {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wpa" => Ok(Self::Wpa),
            "wep" => Ok(Self::Wep),
            "nopass" | "none" => Ok(Self::NoPass),
            _ => Err(format!(
                "Invalid Wi-Fi encryption: '{}'. Valid: WPA, WEP, nopass",
                s
            )),
        }
    }
}

/// vCard 3.0 contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VCard {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub org: Option<String>,
    pub website: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QrPayload {
    Url {
        url: String,
    },
    #[serde(rename_all = "camelCase")]
    Wifi {
        ssid: String,
        password: Option<String>,
        #[serde(default)]
        encryption: WifiEncryption,
        #[serde(default)]
        hidden: bool,
    },
    #[serde(rename = "vcard")]
    VCard(VCard),
    Email {
        to: String,
        subject: Option<String>,
        body: Option<String>,
    },
    Sms {
        phone: String,
        message: Option<String>,
    },
    Event {
        title: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Option<String>,
        description: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Geo {
        latitude: f64,
        longitude: f64,
    },
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QryftError::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Wi-Fi 字段中 `\ ; , " :` 需要反斜杠转义
fn escape_wifi(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | '"' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn format_ical(date: &DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

impl QrPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url { .. } => "url",
            Self::Wifi { .. } => "wifi",
            Self::VCard(_) => "vcard",
            Self::Email { .. } => "email",
            Self::Sms { .. } => "sms",
            Self::Event { .. } => "event",
            Self::Geo { .. } => "geo",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Url { url } => normalize_destination(url)
                .map(|_| ())
                .map_err(|e| QryftError::validation(e.to_string())),
            Self::Wifi { ssid, .. } => require("SSID", ssid),
            Self::VCard(card) => {
                if card.first_name.trim().is_empty() && card.last_name.trim().is_empty() {
                    return Err(QryftError::validation(
                        "vCard needs a first or last name",
                    ));
                }
                Ok(())
            }
            Self::Email { to, .. } => {
                require("Recipient", to)?;
                if !to.contains('@') {
                    return Err(QryftError::validation(format!(
                        "Invalid email address: {}",
                        to
                    )));
                }
                Ok(())
            }
            Self::Sms { phone, .. } => require("Phone number", phone),
            Self::Event {
                title, start, end, ..
            } => {
                require("Event title", title)?;
                if end < start {
                    return Err(QryftError::validation("Event ends before it starts"));
                }
                Ok(())
            }
            Self::Geo {
                latitude,
                longitude,
            } => {
                if !(-90.0..=90.0).contains(latitude) {
                    return Err(QryftError::validation(format!(
                        "Latitude out of range: {}",
                        latitude
                    )));
                }
                if !(-180.0..=180.0).contains(longitude) {
                    return Err(QryftError::validation(format!(
                        "Longitude out of range: {}",
                        longitude
                    )));
                }
                Ok(())
            }
        }
    }

    /// Validate and produce the string a scanner will read.
    pub fn encode(&self) -> Result<String> {
        self.validate()?;

        let payload = match self {
            Self::Url { url } => {
                normalize_destination(url).map_err(|e| QryftError::validation(e.to_string()))?
            }
            Self::Wifi {
                ssid,
                password,
                encryption,
                hidden,
            } => {
                let mut out = format!("WIFI:T:{};S:{};", encryption.as_str(), escape_wifi(ssid));
                if *encryption != WifiEncryption::NoPass
                    && let Some(password) = non_empty(password)
                {
                    out.push_str(&format!("P:{};", escape_wifi(password)));
                }
                if *hidden {
                    out.push_str("H:true;");
                }
                out.push(';');
                out
            }
            Self::VCard(card) => {
                let mut out = String::from("BEGIN:VCARD\nVERSION:3.0\n");
                out.push_str(&format!("N:{};{};;;\n", card.last_name, card.first_name));
                out.push_str(&format!("FN:{} {}\n", card.first_name, card.last_name));
                let optional = [
                    ("ORG", &card.org),
                    ("TITLE", &card.title),
                    ("TEL;TYPE=CELL", &card.phone),
                    ("EMAIL", &card.email),
                    ("URL", &card.website),
                ];
                for (field, value) in optional {
                    if let Some(value) = non_empty(value) {
                        out.push_str(&format!("{}:{}\n", field, value));
                    }
                }
                out.push_str("END:VCARD");
                out
            }
            Self::Email { to, subject, body } => {
                let params: Vec<String> = [("subject", subject), ("body", body)]
                    .into_iter()
                    .filter_map(|(key, value)| {
                        non_empty(value).map(|v| format!("{}={}", key, urlencoding::encode(v)))
                    })
                    .collect();
                if params.is_empty() {
                    format!("mailto:{}", to)
                } else {
                    format!("mailto:{}?{}", to, params.join("&"))
                }
            }
            Self::Sms { phone, message } => {
                format!("SMSTO:{}:{}", phone, message.as_deref().unwrap_or(""))
            }
            Self::Event {
                title,
                start,
                end,
                location,
                description,
            } => {
                let mut out = String::from("BEGIN:VEVENT\n");
                out.push_str(&format!("SUMMARY:{}\n", title));
                out.push_str(&format!("DTSTART:{}\n", format_ical(start)));
                out.push_str(&format!("DTEND:{}\n", format_ical(end)));
                if let Some(location) = non_empty(location) {
                    out.push_str(&format!("LOCATION:{}\n", location));
                }
                if let Some(description) = non_empty(description) {
                    out.push_str(&format!("DESCRIPTION:{}\n", description));
                }
                out.push_str("END:VEVENT");
                out
            }
            Self::Geo {
                latitude,
                longitude,
            } => format!("geo:{},{}", latitude, longitude),
        };

        Ok(payload)
    }
}
