//! Wire model of the Computer Vision `analyze` response and its mapping into
//! detected objects.
//!
//! Parsing and mapping are separate steps: serde only checks the shape,
//! [`AnalyzeResponse::into_objects`] applies the celebrity-over-face rule.
use serde::{Deserialize, Serialize};

use crate::shared::detected_object::{DetectedObject, Detection};
use crate::shared::rectangle::Rectangle;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub faces: Option<Vec<Face>>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub detail: Option<CategoryDetail>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryDetail {
    #[serde(default)]
    pub celebrities: Option<Vec<Celebrity>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Celebrity {
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
    pub face_rectangle: FaceRectangle,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Face {
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    pub face_rectangle: FaceRectangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FaceRectangle {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Metadata {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Error payloads: the service reports `{"code", "message"}` while the API
/// gateway wraps them as `{"error": {"code", "message"}}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<Box<ErrorBody>>,
}

impl From<FaceRectangle> for Rectangle {
    fn from(r: FaceRectangle) -> Self {
        Rectangle::new(r.top, r.left, r.width, r.height)
    }
}

impl AnalyzeResponse {
    pub fn celebrities(&self) -> impl Iterator<Item = &Celebrity> {
        self.categories
            .iter()
            .flatten()
            .filter_map(|c| c.detail.as_ref())
            .filter_map(|d| d.celebrities.as_ref())
            .flatten()
    }

    /// Maps the response into detected objects.
    ///
    /// Recognised celebrities take precedence: when any are present the
    /// generic `faces` are dropped entirely. Otherwise each face becomes
    /// `"Face [<age>, <gender>]"` with no confidence.
    pub fn into_objects(self) -> Vec<DetectedObject> {
        let celebrities: Vec<DetectedObject> = self
            .celebrities()
            .map(|celeb| {
                DetectedObject::new(
                    celeb.name.clone(),
                    Detection::new(celeb.face_rectangle.into(), Some(celeb.confidence)),
                )
            })
            .collect();
        if !celebrities.is_empty() {
            return celebrities;
        }

        self.faces
            .into_iter()
            .flatten()
            .map(|face| {
                DetectedObject::new(
                    face_label(face.age, &face.gender),
                    Detection::new(face.face_rectangle.into(), None),
                )
            })
            .collect()
    }
}

pub fn face_label(age: u32, gender: &str) -> String {
    format!("Face [{age}, {gender}]")
}

/// Best human-readable message from an error body, if it is one.
pub fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let inner = parsed.error.as_deref().unwrap_or(&parsed);
    match (&inner.code, &inner.message) {
        (Some(code), Some(message)) => Some(format!("{code}: {message}")),
        (None, Some(message)) => Some(message.clone()),
        (Some(code), None) => Some(code.clone()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(json: &str) -> AnalyzeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_celebrity_takes_precedence_over_faces() {
        let response = parse(
            r#"{"categories":[{"detail":{"celebrities":[{"name":"Jane Doe","confidence":0.91,"faceRectangle":{"top":10,"left":20,"width":30,"height":40}}]}}],"faces":[{"age":40,"gender":"Male","faceRectangle":{"top":1,"left":1,"width":5,"height":5}}]}"#,
        );

        let objects = response.into_objects();

        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].label, "Jane Doe");
        assert_relative_eq!(objects[0].detection.confidence.unwrap(), 0.91);
        assert_eq!(*objects[0].rectangle(), Rectangle::new(10, 20, 30, 40));
    }

    #[test]
    fn test_faces_used_when_no_celebrities() {
        let response = parse(
            r#"{"categories":[],"faces":[{"age":34,"gender":"Female","faceRectangle":{"top":11,"left":22,"width":33,"height":44}}]}"#,
        );

        let objects = response.into_objects();

        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].label, "Face [34, Female]");
        assert_eq!(objects[0].detection.confidence, None);
        assert_eq!(*objects[0].rectangle(), Rectangle::new(11, 22, 33, 44));
    }

    #[test]
    fn test_every_face_maps_one_to_one() {
        let response = parse(
            r#"{"categories":[{"name":"people_","score":0.8,"detail":{"celebrities":[]}}],
                "faces":[
                  {"age":20,"gender":"Male","faceRectangle":{"top":0,"left":0,"width":10,"height":10}},
                  {"age":61,"gender":"Female","faceRectangle":{"top":5,"left":50,"width":12,"height":14}},
                  {"age":7,"gender":"Male","faceRectangle":{"top":90,"left":9,"width":8,"height":8}}
                ]}"#,
        );

        let labels: Vec<String> = response.into_objects().into_iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec!["Face [20, Male]", "Face [61, Female]", "Face [7, Male]"]
        );
    }

    #[test]
    fn test_celebrities_across_categories_are_collected() {
        let response = parse(
            r#"{"categories":[
                  {"name":"people_","detail":{"celebrities":[{"name":"A","confidence":0.5,"faceRectangle":{"top":0,"left":0,"width":1,"height":1}}]}},
                  {"name":"outdoor_","detail":null},
                  {"name":"people_portrait","detail":{"celebrities":[{"name":"B","confidence":0.7,"faceRectangle":{"top":2,"left":2,"width":3,"height":3}}]}}
                ]}"#,
        );

        let labels: Vec<String> = response.into_objects().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn test_missing_and_null_arrays_yield_empty() {
        assert!(parse("{}").into_objects().is_empty());
        assert!(parse(r#"{"categories":null,"faces":null}"#)
            .into_objects()
            .is_empty());
    }

    #[test]
    fn test_metadata_and_request_id_parsed() {
        let response = parse(
            r#"{"requestId":"abc-123","metadata":{"format":"Jpeg","width":640,"height":480},"faces":[]}"#,
        );
        assert_eq!(response.request_id.as_deref(), Some("abc-123"));
        let metadata = response.metadata.unwrap();
        assert_eq!(metadata.format, "Jpeg");
        assert_eq!((metadata.width, metadata.height), (640, 480));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let json = r#"{"faces":[{"age":34,"gender":"Female","faceRectangle":{"top":1,"left":2,"width":3,"height":4}}]}"#;
        assert_eq!(parse(json).into_objects(), parse(json).into_objects());
    }

    #[test]
    fn test_error_message_service_shape() {
        let body = br#"{"code":"InvalidImageFormat","requestId":"x","message":"Input data is not a valid image."}"#;
        assert_eq!(
            error_message(body).unwrap(),
            "InvalidImageFormat: Input data is not a valid image."
        );
    }

    #[test]
    fn test_error_message_gateway_shape() {
        let body = br#"{"error":{"code":"401","message":"Access denied due to invalid subscription key."}}"#;
        assert_eq!(
            error_message(body).unwrap(),
            "401: Access denied due to invalid subscription key."
        );
    }

    #[test]
    fn test_error_message_not_json() {
        assert_eq!(error_message(b"<html>Bad Gateway</html>"), None);
    }
}
