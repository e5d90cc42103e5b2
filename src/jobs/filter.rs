//! Job list filtering, sorting and paging.
//!
//! The free-text query matches against `"<company> <role>"`, case-insensitive.
//! Every other criterion is optional and narrows the list further.

use crate::domain::JobRow;
use std::cmp::Reverse;

/// Jobs shown per page.
pub const PAGE_SIZE: usize = 10;

/// Polite status text for a result count.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::jobs::status_message;
///
/// assert_eq!(status_message(2), "2 jobs match your filters");
/// ```
#[must_use]
pub fn status_message(count: usize) -> String {
    format!("{count} jobs match your filters")
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobSort {
    /// Most recently posted first; undated postings keep their order at the end.
    #[default]
    Newest,
    /// Fewest years of experience first.
    YoeAscending,
    /// Most years of experience first.
    YoeDescending,
}

impl JobSort {
    /// Parses the stored option names `new`, `yoe_asc` and `yoe_desc`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "new" => Some(Self::Newest),
            "yoe_asc" => Some(Self::YoeAscending),
            "yoe_desc" => Some(Self::YoeDescending),
            _ => None,
        }
    }
}

/// Filter criteria for the job list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFilter {
    pub query: String,
    /// Case-insensitive substring of the location.
    pub location: String,
    /// Inclusive years-of-experience range. Postings without a value pass.
    pub yoe_range: (u32, u32),
    /// Postings must require every one of these skills.
    pub skills: Vec<String>,
    /// Postings must accommodate at least one of these disability types.
    pub disability_types: Vec<String>,
    pub sort: JobSort,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            yoe_range: (0, 20),
            skills: Vec::new(),
            disability_types: Vec::new(),
            sort: JobSort::Newest,
        }
    }
}

impl JobFilter {
    #[must_use]
    pub fn matches(&self, job: &JobRow) -> bool {
        let text = self.query.trim().to_lowercase();
        if !text.is_empty() {
            let haystack = format!("{} {}", job.company_name, job.role_title).to_lowercase();
            if !haystack.contains(&text) {
                return false;
            }
        }

        let location = self.location.trim().to_lowercase();
        if !location.is_empty()
            && !job
                .location
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&location))
        {
            return false;
        }

        if let Some(yoe) = job.yoe_required {
            if yoe < self.yoe_range.0 || yoe > self.yoe_range.1 {
                return false;
            }
        }

        let has_all_skills = self.skills.iter().all(|wanted| {
            job.required_skills
                .iter()
                .any(|s| s.eq_ignore_ascii_case(wanted))
        });
        if !has_all_skills {
            return false;
        }

        self.disability_types.is_empty()
            || self.disability_types.iter().any(|wanted| {
                job.disability_types
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(wanted))
            })
    }

    /// Matching jobs in display order.
    #[must_use]
    pub fn apply<'a>(&self, jobs: &'a [JobRow]) -> Vec<&'a JobRow> {
        let _span = tracing::debug_span!("apply_job_filter", total = jobs.len(), sort = ?self.sort).entered();

        let mut matched: Vec<&JobRow> = jobs.iter().filter(|job| self.matches(job)).collect();
        match self.sort {
            JobSort::Newest => matched.sort_by_key(|job| Reverse(job.created_at)),
            JobSort::YoeAscending => matched.sort_by_key(|job| job.yoe_required.unwrap_or(0)),
            JobSort::YoeDescending => matched.sort_by_key(|job| Reverse(job.yoe_required.unwrap_or(0))),
        }

        tracing::debug!(matched = matched.len(), "jobs filtered");
        matched
    }
}

/// The first `page` pages of `jobs` (pages are 1-based and cumulative).
#[must_use]
pub fn visible_page<'a, T>(jobs: &'a [T], page: usize) -> &'a [T] {
    let end = page.max(1).saturating_mul(PAGE_SIZE).min(jobs.len());
    &jobs[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> Vec<JobRow> {
        let mut list = JobRow::samples();
        list[0].created_at = Some(100);
        list[1].created_at = Some(200);
        list[1].required_skills = vec!["Graphic Design".to_string()];
        list[1].disability_types = vec!["Hearing".to_string()];
        list
    }

    #[test]
    fn test_query_matches_company_and_role() {
        let jobs = jobs();
        let filter = JobFilter {
            query: "inclusive SUPPORT".to_string(),
            ..Default::default()
        };
        assert!(filter.apply(&jobs).is_empty());

        let filter = JobFilter {
            query: "tech customer".to_string(),
            ..Default::default()
        };
        let matched = filter.apply(&jobs);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].role_title, "Customer Support Associate");
    }

    #[test]
    fn test_newest_first_and_yoe_sorting() {
        let jobs = jobs();
        let newest = JobFilter::default().apply(&jobs);
        assert_eq!(newest[0].company_name, "Bright Design");

        let filter = JobFilter {
            sort: JobSort::YoeAscending,
            ..Default::default()
        };
        assert_eq!(filter.apply(&jobs)[0].company_name, "Inclusive Tech");
    }

    #[test]
    fn test_location_skills_and_accommodations() {
        let jobs = jobs();
        let remote = JobFilter {
            location: "remote".to_string(),
            ..Default::default()
        };
        assert_eq!(remote.apply(&jobs).len(), 1);

        let skilled = JobFilter {
            skills: vec!["graphic design".to_string()],
            disability_types: vec!["hearing".to_string(), "vision".to_string()],
            ..Default::default()
        };
        let matched = skilled.apply(&jobs);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].company_name, "Bright Design");

        let senior = JobFilter {
            yoe_range: (5, 20),
            ..Default::default()
        };
        assert!(senior.apply(&jobs).is_empty());
    }

    #[test]
    fn test_paging_and_status() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(visible_page(&items, 1).len(), 10);
        assert_eq!(visible_page(&items, 3).len(), 25);
        assert_eq!(visible_page(&items, 0).len(), 10);
        assert_eq!(status_message(0), "0 jobs match your filters");
        assert_eq!(JobSort::from_key("yoe_desc"), Some(JobSort::YoeDescending));
    }
}
