/// Field mapping: turns chapters and scenes into placeholder values.

use chrono::{NaiveDate, NaiveTime};
use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::core::format::OutputKind;
use crate::core::template::{Field, FieldValues};
use crate::schema::chapter::Chapter;
use crate::schema::project::Project;
use crate::schema::scene::{Lasts, Scene};

/// Placeholder date yWriter stores for "no date".
const NULL_DATE: &str = "0001-01-01";

/// Running word and letter totals over the normal scenes reported so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub words: u64,
    pub letters: u64,
}

impl Totals {
    pub fn add(&mut self, scene: &Scene) {
        self.words += u64::from(scene.word_count);
        self.letters += u64::from(scene.letter_count);
    }
}

/// `HH:MM` from the explicit time of day, or from separate hour and
/// minute fields, or empty.
pub fn format_time(scene: &Scene) -> String {
    if let Some(time) = scene.time.as_deref() {
        let time = time.trim();
        let parsed = NaiveTime::parse_from_str(time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"));
        if let Ok(t) = parsed {
            return t.format("%H:%M").to_string();
        }
    }

    let hour = scene.hour.as_deref().and_then(|h| h.trim().parse::<u32>().ok());
    let minute = scene.minute.as_deref().and_then(|m| m.trim().parse::<u32>().ok());
    match (hour, minute) {
        (Some(h), Some(m)) => NaiveTime::from_hms_opt(h, m, 0)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// The explicit date, or `Day N` for a relative day, or empty.
pub fn format_date(scene: &Scene) -> String {
    if let Some(date) = scene.date.as_deref() {
        let date = date.trim();
        if date != NULL_DATE {
            if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                return d.format("%Y-%m-%d").to_string();
            }
        }
    }
    match scene.day.as_deref().map(str::trim) {
        Some(day) if !day.is_empty() => format!("Day {}", day),
        _ => String::new(),
    }
}

/// `2d 3h 15min`; zero and missing parts are left out.
pub fn format_duration(lasts: &Lasts) -> String {
    let parts = [(lasts.days, "d"), (lasts.hours, "h"), (lasts.minutes, "min")];
    parts
        .iter()
        .filter_map(|(value, unit)| match value {
            Some(v) if *v > 0 => Some(format!("{}{}", v, unit)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Titles of the referenced entities joined by `separator`. IDs missing
/// from the registry are skipped.
pub fn join_titles<K, V>(
    ids: &[K],
    registry: &FxHashMap<K, V>,
    title: impl Fn(&V) -> &str,
    separator: &str,
) -> String
where
    K: Eq + Hash,
{
    ids.iter()
        .filter_map(|id| registry.get(id))
        .map(title)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Values for the document header: project title, author, rating titles.
pub fn document_values(project: &Project, output: OutputKind) -> FieldValues {
    let mut values = FieldValues::default();
    values.insert(Field::Title, output.escape(&project.title));
    values.insert(Field::AuthorName, output.escape(&project.author_name));
    for (field, title) in Field::RATING_TITLES.iter().zip(&project.rating_titles) {
        values.insert(*field, output.escape(title));
    }
    values
}

/// Values for a chapter row. `number` is the displayed chapter number,
/// given for normal chapters only.
pub fn chapter_values(chapter: &Chapter, number: Option<u32>, output: OutputKind) -> FieldValues {
    let mut values = FieldValues::default();
    values.insert(Field::Id, chapter.id.0.to_string());
    values.insert(
        Field::ChapterNumber,
        number.map(|n| n.to_string()).unwrap_or_default(),
    );
    values.insert(Field::Title, output.escape(&chapter.title));
    values.insert(Field::Desc, output.escape(&chapter.desc));
    values
}

/// Values for a scene row. `number` is the displayed scene number, given
/// for normal scenes only; `totals` includes this scene if it is normal.
pub fn scene_values(
    project: &Project,
    scene: &Scene,
    number: Option<u32>,
    totals: Totals,
    output: OutputKind,
    separator: &str,
) -> FieldValues {
    let esc = |s: &str| output.escape(s);
    let mut values = FieldValues::default();

    values.insert(Field::Id, scene.id.0.to_string());
    values.insert(
        Field::SceneNumber,
        number.map(|n| n.to_string()).unwrap_or_default(),
    );
    values.insert(Field::Title, esc(&scene.title));
    values.insert(Field::Desc, esc(&scene.desc));
    values.insert(Field::Notes, esc(&scene.notes));

    let viewpoint = scene
        .viewpoint()
        .and_then(|id| project.characters.get(&id))
        .map(|c| esc(&c.title))
        .unwrap_or_default();
    values.insert(Field::Viewpoint, viewpoint);
    values.insert(Field::Tags, esc(&scene.tags.join(separator)));
    values.insert(
        Field::Characters,
        esc(&join_titles(&scene.characters, &project.characters, |c| &c.title, separator)),
    );
    values.insert(
        Field::Locations,
        esc(&join_titles(&scene.locations, &project.locations, |l| &l.title, separator)),
    );
    values.insert(
        Field::Items,
        esc(&join_titles(&scene.items, &project.items, |i| &i.title, separator)),
    );

    values.insert(Field::ScDate, esc(&format_date(scene)));
    values.insert(Field::ScTime, format_time(scene));
    values.insert(Field::Duration, format_duration(&scene.lasts));

    values.insert(Field::ReactionScene, scene.action.marker().to_string());
    values.insert(Field::Goal, esc(&scene.action.goal));
    values.insert(Field::Conflict, esc(&scene.action.conflict));
    values.insert(Field::Outcome, esc(&scene.action.outcome));

    for (field, rating) in Field::RATINGS.iter().zip(scene.ratings) {
        values.insert(*field, rating.to_string());
    }

    values.insert(Field::WordCount, scene.word_count.to_string());
    values.insert(Field::LetterCount, scene.letter_count.to_string());
    values.insert(Field::WordsTotal, totals.words.to_string());
    values.insert(Field::LettersTotal, totals.letters.to_string());
    values.insert(Field::Status, scene.status.label().to_string());

    values
}
