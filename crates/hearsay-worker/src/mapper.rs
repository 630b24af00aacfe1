// SPDX-FileCopyrightText: 2026 Hearsay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the persisted snapshot model from fetched items.

use chrono::{DateTime, Utc};
use hearsay_core::{CommentModel, HearsayError, HnComment, HnStory, StoryModel};

/// Assembles a [`StoryModel`] from a fetched story and its comments.
///
/// Raw documents are the canonical JSON encodings of the typed items, built
/// fresh per successful fetch.
pub fn build_story_model(
    story: &HnStory,
    comments: &[HnComment],
    api_version: &str,
    queue_name: &str,
    fetched_at: DateTime<Utc>,
) -> Result<StoryModel, HearsayError> {
    let raw_document = encode(story)?;

    let comments = comments
        .iter()
        .map(|comment| {
            Ok(CommentModel {
                comment_id: comment.id,
                raw_document: encode(comment)?,
            })
        })
        .collect::<Result<Vec<_>, HearsayError>>()?;

    Ok(StoryModel {
        story_id: story.id,
        api_version: api_version.to_string(),
        queue_name: queue_name.to_string(),
        fetched_at,
        raw_document,
        comments,
    })
}

fn encode<T: serde::Serialize>(item: &T) -> Result<String, HearsayError> {
    serde_json::to_string(item).map_err(|e| HearsayError::Codec {
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_model_with_canonical_raw_documents() {
        let story = HnStory {
            by: "user".into(),
            id: 1,
            kids: vec![2],
            score: 111,
            time: 1175714200,
            title: "title".into(),
            kind: "story".into(),
            ..HnStory::default()
        };
        let comment = HnComment {
            by: "other".into(),
            id: 2,
            parent: 1,
            text: "hi".into(),
            time: 1175714300,
            kind: "comment".into(),
            ..HnComment::default()
        };
        let fetched_at = Utc::now();

        let model =
            build_story_model(&story, &[comment.clone()], "v0", "15m", fetched_at).unwrap();

        assert_eq!(model.story_id, 1);
        assert_eq!(model.api_version, "v0");
        assert_eq!(model.queue_name, "15m");
        assert_eq!(model.fetched_at, fetched_at);
        assert_eq!(model.raw_document, serde_json::to_string(&story).unwrap());
        assert_eq!(model.comments.len(), 1);
        assert_eq!(model.comments[0].comment_id, 2);
        assert_eq!(
            model.comments[0].raw_document,
            serde_json::to_string(&comment).unwrap()
        );
    }

    #[test]
    fn builds_model_with_no_comments() {
        let story = HnStory {
            id: 9,
            ..HnStory::default()
        };
        let model = build_story_model(&story, &[], "v0", "new", Utc::now()).unwrap();
        assert!(model.comments.is_empty());
    }
}
