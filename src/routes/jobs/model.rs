use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

const JOB_COLUMNS: &str = "id, title, company, location, job_type, salary_min, salary_max, \
     salary_currency, skills, description, requirements, responsibilities, posted_date, \
     deadline_date, employer_id, created_at";

pub const RECENT_JOBS_LIMIT: i64 = 50;
pub const RECOMMENDED_JOBS_LIMIT: i64 = 10;

#[derive(Debug, Serialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: String,
    pub skills: Vec<String>,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub posted_date: DateTime<Utc>,
    pub deadline_date: DateTime<Utc>,
    pub employer_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

/// Derives a job's skill level from its requirement strings. There is no
/// persisted ground truth; a requirement mentioning "senior" marks the job
/// advanced, one mentioning "experience" marks it intermediate.
pub fn derive_skill_level(requirements: &[String]) -> SkillLevel {
    if requirements.iter().any(|r| r.contains("senior")) {
        SkillLevel::Advanced
    } else if requirements.iter().any(|r| r.contains("experience")) {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Beginner
    }
}

/// Comma-separated multi-value query parameters for the job listing,
/// e.g. `?location=Dodoma,Arusha&skill_level=beginner`.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub skill_level: Option<String>,
}

#[derive(Debug, Default)]
pub struct JobFilters {
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub skill_levels: Vec<String>,
}

fn parse_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl JobFilters {
    pub fn from_query(query: &JobListQuery) -> Self {
        Self {
            locations: parse_list(query.location.as_deref()),
            job_types: parse_list(query.job_type.as_deref()),
            skill_levels: parse_list(query.skill_level.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.job_types.is_empty() && self.skill_levels.is_empty()
    }

    /// An empty selection for a dimension places no constraint on it; the
    /// three dimensions AND together.
    pub fn matches(&self, job: &Job) -> bool {
        let location_match = self.locations.is_empty() || self.locations.contains(&job.location);
        let type_match = self.job_types.is_empty() || self.job_types.contains(&job.job_type);

        let level = derive_skill_level(&job.requirements);
        let level_match = self.skill_levels.is_empty()
            || self.skill_levels.iter().any(|l| l == level.as_str());

        location_match && type_match && level_match
    }
}

impl Job {
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY posted_date DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, job_id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(job_id)
            .fetch_optional(pool)
            .await
    }

    /// Skill-overlap recommendation: a job qualifies when at least one of
    /// the caller's skill names exactly matches an entry in its skills
    /// array. No scoring; ties break on posted_date alone. A caller with no
    /// recorded skills gets the most recent jobs instead.
    pub async fn recommended_for(
        pool: &PgPool,
        skill_names: &[String],
    ) -> Result<Vec<Self>, sqlx::Error> {
        if skill_names.is_empty() {
            return Self::list_recent(pool, RECOMMENDED_JOBS_LIMIT).await;
        }

        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs
             WHERE skills && $1::text[]
             ORDER BY posted_date DESC LIMIT $2"
        ))
        .bind(skill_names)
        .bind(RECOMMENDED_JOBS_LIMIT)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(location: &str, job_type: &str, requirements: &[&str]) -> Job {
        let now = Utc::now();
        Job {
            id: 1,
            title: "Software Engineer".into(),
            company: "Acme".into(),
            location: location.into(),
            job_type: job_type.into(),
            salary_min: Some(1_000_000),
            salary_max: Some(2_000_000),
            salary_currency: "TZS".into(),
            skills: vec!["Python".into()],
            description: "Build things".into(),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            responsibilities: vec![],
            posted_date: now,
            deadline_date: now,
            employer_id: None,
            created_at: now,
        }
    }

    #[test]
    fn skill_level_is_derived_from_requirement_substrings() {
        let advanced = ["5+ years as a senior engineer".to_string()];
        assert_eq!(derive_skill_level(&advanced), SkillLevel::Advanced);

        let intermediate = ["experience with PostgreSQL".to_string()];
        assert_eq!(derive_skill_level(&intermediate), SkillLevel::Intermediate);

        let beginner = ["willingness to learn".to_string()];
        assert_eq!(derive_skill_level(&beginner), SkillLevel::Beginner);

        assert_eq!(derive_skill_level(&[]), SkillLevel::Beginner);
    }

    #[test]
    fn senior_takes_precedence_over_experience() {
        let reqs = [
            "experience with React".to_string(),
            "senior level ownership".to_string(),
        ];
        assert_eq!(derive_skill_level(&reqs), SkillLevel::Advanced);
    }

    #[test]
    fn empty_filters_match_everything() {
        let filters = JobFilters::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&job("Dodoma", "full-time", &["anything"])));
    }

    #[test]
    fn filter_dimensions_and_together() {
        let filters = JobFilters {
            locations: vec!["Dodoma".into()],
            job_types: vec!["full-time".into()],
            skill_levels: vec![],
        };
        assert!(filters.matches(&job("Dodoma", "full-time", &[])));
        assert!(!filters.matches(&job("Arusha", "full-time", &[])));
        assert!(!filters.matches(&job("Dodoma", "part-time", &[])));
    }

    #[test]
    fn skill_level_filter_uses_the_derived_level() {
        let filters = JobFilters {
            locations: vec![],
            job_types: vec![],
            skill_levels: vec!["advanced".into()],
        };
        assert!(filters.matches(&job("Dodoma", "full-time", &["senior engineer wanted"])));
        assert!(!filters.matches(&job("Dodoma", "full-time", &["experience with SQL"])));
    }

    #[test]
    fn unrecognized_skill_level_selection_matches_nothing() {
        let filters = JobFilters {
            locations: vec![],
            job_types: vec![],
            skill_levels: vec!["expert".into()],
        };
        assert!(!filters.matches(&job("Dodoma", "full-time", &["senior engineer wanted"])));
    }

    #[test]
    fn query_lists_are_comma_separated_and_trimmed() {
        let query = JobListQuery {
            location: Some("Dodoma, Arusha ,".into()),
            job_type: None,
            skill_level: Some("".into()),
        };
        let filters = JobFilters::from_query(&query);
        assert_eq!(filters.locations, vec!["Dodoma", "Arusha"]);
        assert!(filters.job_types.is_empty());
        assert!(filters.skill_levels.is_empty());
    }
}
