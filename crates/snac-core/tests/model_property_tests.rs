#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use snac_core::model::{Snippet, SnippetId, ID_ALPHABET, ID_LEN};

fn tag() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).unwrap())
}

prop_compose! {
    fn snippet()(
        title in ".{0,40}",
        description in ".{0,80}",
        tags in prop::collection::vec(tag(), 0..6),
        language in "[a-z]{0,10}",
        content in "(?s).{0,200}",
        last_modified in timestamp(),
    ) -> Snippet {
        Snippet {
            id: SnippetId::generate(),
            team_id: "prop-team".to_string(),
            title,
            description,
            tags,
            language,
            content,
            last_modified,
        }
    }
}

proptest! {
    #[test]
    fn generated_ids_use_alphabet(_seed in 0u8..255) {
        let id = SnippetId::generate();
        prop_assert_eq!(id.as_str().len(), ID_LEN);
        prop_assert!(id.as_str().bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn generated_ids_parse_back(_seed in 0u8..255) {
        let id = SnippetId::generate();
        prop_assert_eq!(SnippetId::parse(id.as_str()).unwrap(), id.clone());
        prop_assert_eq!(SnippetId::parse(&id.as_str().to_lowercase()).unwrap(), id);
    }

    #[test]
    fn row_conversion_is_stable(snippet in snippet()) {
        let row = snippet.to_row();
        let again = row.clone().into_snippet().unwrap().to_row();
        prop_assert_eq!(again, row);
    }

    #[test]
    fn comma_free_tags_survive_storage(snippet in snippet()) {
        let back = snippet.to_row().into_snippet().unwrap();
        prop_assert_eq!(back, snippet);
    }
}
