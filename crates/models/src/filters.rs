//! Structured list filters and their translation into SeaORM conditions.
//!
//! Every supplied field narrows the result (AND). Text matching is a
//! case-insensitive substring match with `%`, `_` and `\` in the input
//! escaped so they only match themselves. Values are always bound as
//! parameters.
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, Query, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait};

use crate::{project, project_skill, skill, student, student_skill, user};

#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Substring of the user's display name.
    pub name: Option<String>,
    pub university: Option<String>,
    /// Substring of at least one associated skill name.
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub skill: Option<String>,
    /// Inclusive upper bound; values <= 0 are ignored.
    pub max_duration: Option<i32>,
    /// Substring of name, description or deliverables.
    pub search: Option<String>,
}

/// Escape LIKE metacharacters so the value matches literally.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `%<escaped lowercase value>%`
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(&value.to_lowercase()))
}

/// Treat blank strings as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn lower_contains<C: IntoColumnRef>(col: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(contains_pattern(value)).escape('\\'))
}

/// `EXISTS (SELECT 1 FROM <link> JOIN skills ON .. WHERE <link>.<owner> = <owner_id> AND <skill name matches>)`
fn has_skill_like<E, O>(link: E, owner_col: E::Column, skill_col: E::Column, owner_id: O, value: &str) -> SimpleExpr
where
    E: EntityTrait,
    O: IntoColumnRef,
{
    Expr::exists(
        Query::select()
            .expr(Expr::val(1))
            .from(link)
            .inner_join(
                skill::Entity,
                Expr::col((skill::Entity, skill::Column::Id)).equals((link, skill_col)),
            )
            .and_where(Expr::col((link, owner_col)).equals(owner_id))
            .and_where(lower_contains((skill::Entity, skill::Column::Name), value))
            .to_owned(),
    )
}

impl StudentFilter {
    pub fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(name) = present(&self.name) {
            cond = cond.add(lower_contains((user::Entity, user::Column::Name), name));
        }
        if let Some(university) = present(&self.university) {
            cond = cond.add(lower_contains((student::Entity, student::Column::University), university));
        }
        if let Some(skill) = present(&self.skill) {
            cond = cond.add(has_skill_like(
                student_skill::Entity,
                student_skill::Column::StudentId,
                student_skill::Column::SkillId,
                (student::Entity, student::Column::Id),
                skill,
            ));
        }
        cond
    }
}

impl ProjectFilter {
    pub fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(skill) = present(&self.skill) {
            cond = cond.add(has_skill_like(
                project_skill::Entity,
                project_skill::Column::ProjectId,
                project_skill::Column::SkillId,
                (project::Entity, project::Column::Id),
                skill,
            ));
        }
        if let Some(max) = self.max_duration.filter(|d| *d > 0) {
            cond = cond.add(project::Column::Duration.lte(max));
        }
        if let Some(search) = present(&self.search) {
            cond = cond.add(
                Condition::any()
                    .add(lower_contains((project::Entity, project::Column::Name), search))
                    .add(lower_contains((project::Entity, project::Column::Description), search))
                    .add(lower_contains((project::Entity, project::Column::Deliverables), search)),
            );
        }
        cond
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(contains_pattern("GoLang"), "%golang%");
    }

    #[test]
    fn empty_filters_add_no_predicates() {
        let sql = project::Entity::find()
            .filter(ProjectFilter::default().to_condition())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"));

        let blank = StudentFilter { name: Some("   ".into()), university: Some(String::new()), skill: None };
        let sql = student::Entity::find()
            .filter(blank.to_condition())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn non_positive_max_duration_is_ignored() {
        let f = ProjectFilter { max_duration: Some(0), ..Default::default() };
        let sql = project::Entity::find().filter(f.to_condition()).build(DbBackend::Postgres).to_string();
        assert!(!sql.contains("duration"));

        let f = ProjectFilter { max_duration: Some(6), ..Default::default() };
        let sql = project::Entity::find().filter(f.to_condition()).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""projects"."duration" <= 6"#));
    }

    #[test]
    fn project_search_matches_any_text_column() {
        let f = ProjectFilter { search: Some("API".into()), ..Default::default() };
        let sql = project::Entity::find().filter(f.to_condition()).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#"LOWER("projects"."name") LIKE '%api%'"#));
        assert!(sql.contains(r#"LOWER("projects"."description") LIKE '%api%'"#));
        assert!(sql.contains(r#"LOWER("projects"."deliverables") LIKE '%api%'"#));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn skill_filter_is_existential_over_link_table() {
        let f = StudentFilter { skill: Some("Go".into()), ..Default::default() };
        let sql = student::Entity::find().filter(f.to_condition()).build(DbBackend::Postgres).to_string();
        assert!(sql.contains("EXISTS"));
        assert!(sql.contains(r#""student_skills"."student_id" = "students"."id""#));
        assert!(sql.contains(r#"LOWER("skills"."name") LIKE '%go%'"#));
    }
}
