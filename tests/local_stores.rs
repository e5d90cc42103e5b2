use inclusive_board::chat::LocalChat;
use inclusive_board::domain::{ChatRole, JobId, JobRow};
use inclusive_board::jobs::{status_message, JobFilter, SavedJobs};
use inclusive_board::progress::ProgressTracker;
use inclusive_board::resources::{resource_links, SkillSelection};
use inclusive_board::storage::{shared, JsonFileStore};
use std::rc::Rc;

fn open(dir: &tempfile::TempDir) -> JsonFileStore {
    JsonFileStore::open(dir.path().join("store.json")).unwrap()
}

#[test]
fn saved_jobs_and_selection_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut saved = SavedJobs::new(open(&dir));
        saved.toggle(&JobId::from(2)).unwrap();
        saved.toggle(&JobId::from("abc")).unwrap();
    }
    {
        let mut selection = SkillSelection::load(open(&dir), &[]);
        selection.set_selected("Typing", true).unwrap();
        selection.set_selected("Graphic Design", true).unwrap();
    }

    let store = shared(open(&dir));
    let saved = SavedJobs::new(Rc::clone(&store));
    assert_eq!(saved.list(), vec![JobId::from(2), JobId::from("abc")]);

    let selection = SkillSelection::load(Rc::clone(&store), &[]);
    assert_eq!(selection.selected(), ["Typing", "Graphic Design"]);

    let linked = SkillSelection::load(store, &SkillSelection::<JsonFileStore>::parse_link_value("Accounting, Typing,"));
    assert_eq!(linked.selected(), ["Accounting", "Typing"]);
}

#[test]
fn resource_completion_rewards_points() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = ProgressTracker::new(open(&dir));

    let links = resource_links("Typing");
    let first = links.iter().next().unwrap();
    assert_eq!(tracker.complete_resource("Typing", &first.url, true).unwrap(), 5);
    assert_eq!(tracker.complete_resource("Typing", &first.url, true).unwrap(), 0);
    assert_eq!(tracker.complete_resource("Typing", &first.url, false).unwrap(), 0);
    assert!(!tracker.is_completed("Typing", &first.url));
    assert_eq!(tracker.get_state().total_points, 5);
}

#[test]
fn chat_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let chat_id = {
        let mut chat = LocalChat::new(open(&dir));
        chat.save_self_profile("Ravi", "ravi@example.com", ChatRole::Employer).unwrap();
        let row = chat.start_chat("Candidate@Example.com").unwrap();
        chat.send(&row.id, "Thanks for applying").unwrap();
        row.id
    };

    let chat = LocalChat::new(open(&dir));
    let chats = chat.chats_for_self();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].candidate_email, "candidate@example.com");
    assert_eq!(chats[0].last_message.as_deref(), Some("Thanks for applying"));
    assert_eq!(chat.messages(&chat_id).len(), 1);
}

#[test]
fn filtering_sample_jobs_reports_count() {
    let jobs = JobRow::samples();
    let filter = JobFilter {
        query: "designer".to_string(),
        ..Default::default()
    };
    let matched = filter.apply(&jobs);
    assert_eq!(status_message(matched.len()), "1 jobs match your filters");
}
