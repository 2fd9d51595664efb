//! Record kinds accepted by the API and the collections they live in

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// The three independent record kinds this service persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Video,
    Sentiment,
    Location,
}

impl RecordKind {
    /// MongoDB collection backing this kind
    pub fn collection_name(self) -> &'static str {
        match self {
            RecordKind::Video => "vlogs",
            RecordKind::Sentiment => "sentiments",
            RecordKind::Location => "gps",
        }
    }
}

/// A typed record body that maps onto one collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: RecordKind;
}

/// A short video reference. `video_url` is a path or URL to the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub user_id: String,
    #[serde(default)]
    pub video_title: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Record for VideoRecord {
    const KIND: RecordKind = RecordKind::Video;
}

/// A text-sentiment entry. `emotion` is a free-form label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub user_id: String,
    pub text: String,
    pub emotion: String,
    pub score: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Record for SentimentRecord {
    const KIND: RecordKind = RecordKind::Sentiment;
}

/// A GPS fix. Coordinates are not range checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub user_id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Record for LocationRecord {
    const KIND: RecordKind = RecordKind::Location;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{Bson, to_document};

    #[test]
    fn collection_names_match_kinds() {
        assert_eq!(VideoRecord::KIND.collection_name(), "vlogs");
        assert_eq!(SentimentRecord::KIND.collection_name(), "sentiments");
        assert_eq!(LocationRecord::KIND.collection_name(), "gps");
    }

    #[test]
    fn missing_optional_fields_are_stored_as_null() {
        let vlog: VideoRecord = serde_json::from_str(r#"{"user_id":"u1"}"#).expect("parse vlog");
        let doc = to_document(&vlog).expect("encode vlog");

        assert_eq!(doc.get_str("user_id").unwrap(), "u1");
        assert_eq!(doc.get("video_title"), Some(&Bson::Null));
        assert_eq!(doc.get("video_url"), Some(&Bson::Null));
        assert_eq!(doc.get("note"), Some(&Bson::Null));
    }

    #[test]
    fn integer_scores_and_coordinates_are_accepted() {
        let sentiment: SentimentRecord = serde_json::from_str(
            r#"{"user_id":"u1","text":"ok","emotion":"neutral","score":1}"#,
        )
        .expect("parse sentiment");
        assert_eq!(sentiment.score, 1.0);

        let location: LocationRecord =
            serde_json::from_str(r#"{"user_id":"u1","lat":25,"lon":121.5}"#).expect("parse gps");
        let doc = to_document(&location).expect("encode gps");
        assert_eq!(doc.get_f64("lat").unwrap(), 25.0);
        assert_eq!(doc.get("created_at"), Some(&Bson::Null));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result = serde_json::from_str::<SentimentRecord>(r#"{"user_id":"u1","text":"hi"}"#);
        assert!(result.is_err());
    }
}
