use rusqlite::{Connection, params};

use crate::db::now_epoch;
use crate::{StoreError, StudyGuide, Topic};

pub fn create_guide(
    conn: &Connection,
    user_id: Option<i64>,
    filename: &str,
    original_name: &str,
    exam_board: Option<&str>,
    year: Option<&str>,
) -> Result<StudyGuide, StoreError> {
    let created_at = now_epoch();
    conn.execute(
        "INSERT INTO study_guides (user_id, filename, original_name, exam_board, year, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![user_id, filename, original_name, exam_board, year, created_at],
    )?;

    Ok(StudyGuide {
        id: conn.last_insert_rowid(),
        user_id,
        filename: filename.to_string(),
        original_name: original_name.to_string(),
        exam_board: exam_board.map(str::to_string),
        year: year.map(str::to_string),
        created_at,
    })
}

pub fn guide_by_id(conn: &Connection, id: i64) -> Result<Option<StudyGuide>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, filename, original_name, exam_board, year, created_at \
         FROM study_guides WHERE id = ?1",
    )?;
    let guide = match stmt.query_row(params![id], row_to_guide) {
        Ok(g) => Some(g),
        Err(rusqlite::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(guide)
}

pub fn guides_for_user(conn: &Connection, user_id: i64) -> Result<Vec<StudyGuide>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, filename, original_name, exam_board, year, created_at \
         FROM study_guides WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
    )?;
    let guides = stmt
        .query_map(params![user_id], row_to_guide)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(guides)
}

/// Insert topic rows for a guide in one transaction; blank titles are skipped.
pub fn add_topics(conn: &Connection, guide_id: i64, titles: &[String]) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO topics (study_guide_id, title, selected) VALUES (?1, ?2, 0)",
        )?;
        for title in titles {
            let title = title.trim();
            if title.is_empty() {
                continue;
            }
            stmt.execute(params![guide_id, title])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn topics_for_guide(conn: &Connection, guide_id: i64) -> Result<Vec<Topic>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, study_guide_id, title, selected FROM topics \
         WHERE study_guide_id = ?1 ORDER BY id",
    )?;
    let topics = stmt
        .query_map(params![guide_id], row_to_topic)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(topics)
}

pub fn set_topic_selected(
    conn: &Connection,
    topic_id: i64,
    selected: bool,
) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE topics SET selected = ?1 WHERE id = ?2",
        params![selected, topic_id],
    )?;
    Ok(())
}

/// Make exactly `topic_ids` the selected set for `guide_id`.
///
/// Clears then sets in one transaction; ids belonging to other guides are
/// ignored by the guide-scoped UPDATE.
pub fn set_selection(conn: &Connection, guide_id: i64, topic_ids: &[i64]) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "UPDATE topics SET selected = 0 WHERE study_guide_id = ?1",
        params![guide_id],
    )?;
    {
        let mut stmt = tx.prepare_cached(
            "UPDATE topics SET selected = 1 WHERE id = ?1 AND study_guide_id = ?2",
        )?;
        for topic_id in topic_ids {
            stmt.execute(params![topic_id, guide_id])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn selected_topics(conn: &Connection, guide_id: i64) -> Result<Vec<Topic>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, study_guide_id, title, selected FROM topics \
         WHERE study_guide_id = ?1 AND selected = 1 ORDER BY id",
    )?;
    let topics = stmt
        .query_map(params![guide_id], row_to_topic)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(topics)
}

fn row_to_guide(row: &rusqlite::Row<'_>) -> rusqlite::Result<StudyGuide> {
    Ok(StudyGuide {
        id: row.get(0)?,
        user_id: row.get(1)?,
        filename: row.get(2)?,
        original_name: row.get(3)?,
        exam_board: row.get(4)?,
        year: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn row_to_topic(row: &rusqlite::Row<'_>) -> rusqlite::Result<Topic> {
    Ok(Topic {
        id: row.get(0)?,
        study_guide_id: row.get(1)?,
        title: row.get(2)?,
        selected: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::Store;

    fn store_with_guide() -> (Store, i64) {
        let store = Store::open_in_memory().unwrap();
        let user = store.create_user("ada@example.org", "pw", "Ada").unwrap();
        let guide = store
            .create_guide(
                Some(user.id),
                "uploads/abc.pdf",
                "maths.pdf",
                Some("AQA"),
                Some("2025"),
            )
            .unwrap();
        (store, guide.id)
    }

    #[test]
    fn test_create_and_fetch_guide() {
        let (store, guide_id) = store_with_guide();
        let guide = store.guide_by_id(guide_id).unwrap().unwrap();
        assert_eq!(guide.original_name, "maths.pdf");
        assert_eq!(guide.exam_board.as_deref(), Some("AQA"));
        assert!(store.guide_by_id(9999).unwrap().is_none());
    }

    #[test]
    fn test_guides_for_user_newest_first() {
        let (store, first_id) = store_with_guide();
        let user = store.user_by_email("ada@example.org").unwrap().unwrap();
        let second = store
            .create_guide(Some(user.id), "uploads/def.txt", "later.txt", None, None)
            .unwrap();

        let guides = store.guides_for_user(user.id).unwrap();
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].id, second.id);
        assert_eq!(guides[1].id, first_id);
    }

    #[test]
    fn test_add_topics_skips_blanks() {
        let (store, guide_id) = store_with_guide();
        store
            .add_topics(
                guide_id,
                &[
                    "Algebra".to_string(),
                    "   ".to_string(),
                    "Geometry".to_string(),
                    String::new(),
                ],
            )
            .unwrap();

        let topics = store.topics_for_guide(guide_id).unwrap();
        let titles: Vec<_> = topics.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Algebra", "Geometry"]);
        assert!(topics.iter().all(|t| !t.selected));
    }

    #[test]
    fn test_set_topic_selected() {
        let (store, guide_id) = store_with_guide();
        store.add_topics(guide_id, &["Algebra".to_string()]).unwrap();
        let topic = &store.topics_for_guide(guide_id).unwrap()[0];

        store.set_topic_selected(topic.id, true).unwrap();
        assert!(store.topics_for_guide(guide_id).unwrap()[0].selected);

        store.set_topic_selected(topic.id, false).unwrap();
        assert!(!store.topics_for_guide(guide_id).unwrap()[0].selected);
    }

    #[test]
    fn test_set_selection_replaces_previous_set() {
        let (store, guide_id) = store_with_guide();
        store
            .add_topics(
                guide_id,
                &[
                    "Algebra".to_string(),
                    "Geometry".to_string(),
                    "Statistics".to_string(),
                ],
            )
            .unwrap();
        let topics = store.topics_for_guide(guide_id).unwrap();

        store.set_selection(guide_id, &[topics[0].id, topics[2].id]).unwrap();
        let selected: Vec<_> = store
            .selected_topics(guide_id)
            .unwrap()
            .iter()
            .map(|t| t.title.clone())
            .collect();
        assert_eq!(selected, vec!["Algebra", "Statistics"]);

        store.set_selection(guide_id, &[topics[1].id]).unwrap();
        let selected: Vec<_> = store
            .selected_topics(guide_id)
            .unwrap()
            .iter()
            .map(|t| t.title.clone())
            .collect();
        assert_eq!(selected, vec!["Geometry"]);
    }

    #[test]
    fn test_set_selection_cannot_touch_other_guides() {
        let (store, guide_id) = store_with_guide();
        let user = store.user_by_email("ada@example.org").unwrap().unwrap();
        let other = store
            .create_guide(Some(user.id), "uploads/other.txt", "other.txt", None, None)
            .unwrap();

        store.add_topics(guide_id, &["Algebra".to_string()]).unwrap();
        store.add_topics(other.id, &["Poetry".to_string()]).unwrap();
        let foreign_topic = &store.topics_for_guide(other.id).unwrap()[0];

        store.set_selection(guide_id, &[foreign_topic.id]).unwrap();
        assert!(store.selected_topics(guide_id).unwrap().is_empty());
        assert!(store.selected_topics(other.id).unwrap().is_empty());
    }
}
