use gp_core::ID;
use gp_core::Unique;

/// One user-declared section of a guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: String,
    pub image: Option<String>,
}

impl Section {
    /// Zips the parallel per-section sequences, refusing misaligned input.
    pub fn zip(
        headings: Vec<String>,
        bodies: Vec<String>,
        images: Vec<Option<String>>,
    ) -> Option<Vec<Self>> {
        if headings.len() != bodies.len() || headings.len() != images.len() {
            return None;
        }
        Some(
            headings
                .into_iter()
                .zip(bodies)
                .zip(images)
                .map(|((heading, body), image)| Self {
                    heading,
                    body,
                    image,
                })
                .collect(),
        )
    }
}

/// User-authored guide document.
///
/// The author is the creating user's username, fixed at creation; it is the
/// ownership key for edit and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    id: ID<Self>,
    author: String,
    title: String,
    tag: String,
    sections: Vec<Section>,
}

impl Guide {
    pub fn new(
        id: ID<Self>,
        author: String,
        title: String,
        tag: String,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            id,
            author,
            title,
            tag,
            sections,
        }
    }
    pub fn author(&self) -> &str {
        &self.author
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn tag(&self) -> &str {
        &self.tag
    }
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
    /// Splits sections back into the parallel arrays the table stores.
    pub fn columns(&self) -> (Vec<String>, Vec<String>, Vec<Option<String>>) {
        let headings = self.sections.iter().map(|s| s.heading.clone()).collect();
        let bodies = self.sections.iter().map(|s| s.body.clone()).collect();
        let images = self.sections.iter().map(|s| s.image.clone()).collect();
        (headings, bodies, images)
    }
}

impl Unique for Guide {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use gp_pg::*;

    impl Schema for Guide {
        fn name() -> &'static str {
            GUIDES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                GUIDES,
                " (
                    id          UUID PRIMARY KEY,
                    author      VARCHAR(32) NOT NULL,
                    title       TEXT NOT NULL,
                    tag         VARCHAR(64) NOT NULL,
                    headings    TEXT[] NOT NULL,
                    bodies      TEXT[] NOT NULL,
                    images      TEXT[] NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_guides_author ON ",
                GUIDES,
                " (author);
                 CREATE INDEX IF NOT EXISTS idx_guides_tag ON ",
                GUIDES,
                " (tag);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_aligns_triples() {
        let sections = Section::zip(
            vec!["install".into(), "configure".into()],
            vec!["run the installer".into(), "edit the config".into()],
            vec![Some("/uploads/a.png".into()), None],
        )
        .unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "install");
        assert_eq!(sections[1].image, None);
    }

    #[test]
    fn zip_rejects_misaligned_input() {
        assert!(Section::zip(vec!["a".into()], vec![], vec![None]).is_none());
        assert!(Section::zip(vec!["a".into()], vec!["b".into()], vec![]).is_none());
    }

    #[test]
    fn columns_round_trip() {
        let sections = Section::zip(
            vec!["a".into(), "b".into()],
            vec!["1".into(), "2".into()],
            vec![None, Some("/uploads/x.png".into())],
        )
        .unwrap();
        let guide = Guide::new(
            ID::default(),
            "ada".into(),
            "vm setup".into(),
            "VM".into(),
            sections.clone(),
        );
        let (headings, bodies, images) = guide.columns();
        assert_eq!(Section::zip(headings, bodies, images).unwrap(), sections);
    }
}
