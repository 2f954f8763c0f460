use serde::Deserialize;
use serde::Serialize;

/// Create/edit payload. Image entries are path strings produced by the
/// upload collaborator; `null` slots mean "no image" on create and "keep the
/// stored image" on edit.
#[derive(Deserialize)]
pub struct GuideRequest {
    pub title: String,
    pub tag: String,
    pub headings: Vec<String>,
    pub bodies: Vec<String>,
    #[serde(default)]
    pub images: Vec<Option<String>>,
}

#[derive(Serialize)]
pub struct SectionView {
    pub heading: String,
    pub body: String,
    pub image: Option<String>,
}

#[derive(Serialize)]
pub struct GuideView {
    pub id: String,
    pub author: String,
    pub title: String,
    pub tag: String,
    pub sections: Vec<SectionView>,
}

impl From<&crate::Guide> for GuideView {
    fn from(guide: &crate::Guide) -> Self {
        use gp_core::Unique;
        Self {
            id: guide.id().to_string(),
            author: guide.author().to_string(),
            title: guide.title().to_string(),
            tag: guide.tag().to_string(),
            sections: guide
                .sections()
                .iter()
                .map(|s| SectionView {
                    heading: s.heading.clone(),
                    body: s.body.clone(),
                    image: s.image.clone(),
                })
                .collect(),
        }
    }
}
