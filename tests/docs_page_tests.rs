/// Documentation page behavior tests.
///
/// Covers the copy helper over a realistic page of code blocks and the
/// navigation menu persisting its sections across page loads.
use std::time::{Duration, Instant};

use agentdeck::copy::button::{COPIED_LABEL, COPY_LABEL, FAILED_LABEL};
use agentdeck::copy::{CodeBlock, CodeDocument, CopyHelper, CopyPolicy, CopyStatus, MemoryClipboard};
use agentdeck::nav::{NavMenu, NavSection, NavState, NavStore, SectionId};
use tempfile::tempdir;

fn lab_page() -> CodeDocument {
    CodeDocument::new(vec![
        CodeBlock::with_header("Terminal", "pip install agent-framework --pre"),
        CodeBlock::with_header("Python", "agent = ChatAgent(name=\"Helper\")"),
        CodeBlock::standalone("AZURE_OPENAI_ENDPOINT=https://example.openai.azure.com"),
    ])
}

// ---------------------------------------------------------------------------
// Copy helper
// ---------------------------------------------------------------------------

#[test]
fn repeated_attachment_adds_no_duplicate_controls() {
    let mut doc = lab_page();
    let helper = CopyHelper::default();

    assert_eq!(helper.attach(&mut doc), 3);
    assert_eq!(helper.attach(&mut doc), 0);
    assert_eq!(helper.attach(&mut doc), 0);
    assert_eq!(doc.button_count(), 3);
}

#[test]
fn narrow_policy_only_covers_terminal_blocks() {
    let mut doc = lab_page();
    let helper = CopyHelper::new(CopyPolicy::Narrow, Duration::from_millis(2000));

    assert_eq!(helper.attach(&mut doc), 1);
    assert!(doc.blocks[0].copy_button.is_some());
    assert!(doc.blocks[1].copy_button.is_none());
}

#[test]
fn copy_feedback_reverts_after_the_delay() {
    let mut doc = lab_page();
    CopyHelper::default().attach(&mut doc);
    let mut clipboard = MemoryClipboard::new();
    let start = Instant::now();

    assert_eq!(doc.click(0, &mut clipboard, start).unwrap(), CopyStatus::Copied);
    assert_eq!(clipboard.contents(), Some("pip install agent-framework --pre"));
    let button = doc.blocks[0].copy_button.as_ref().unwrap();
    assert_eq!(button.label(), COPIED_LABEL);
    assert!(button.is_copied());

    assert_eq!(doc.tick(start + Duration::from_millis(1999)), 0);
    assert_eq!(doc.tick(start + Duration::from_millis(2000)), 1);
    let button = doc.blocks[0].copy_button.as_ref().unwrap();
    assert_eq!(button.label(), COPY_LABEL);
    assert!(!button.is_copied());
}

#[test]
fn failed_copy_restores_original_label() {
    let mut doc = lab_page();
    CopyHelper::default().attach(&mut doc);
    let mut clipboard = MemoryClipboard::failing("permission denied");
    let start = Instant::now();

    assert_eq!(doc.click(1, &mut clipboard, start).unwrap(), CopyStatus::Failed);
    assert_eq!(doc.blocks[1].copy_button.as_ref().unwrap().label(), FAILED_LABEL);

    doc.tick(start + Duration::from_secs(2));
    assert_eq!(doc.blocks[1].copy_button.as_ref().unwrap().label(), COPY_LABEL);
}

#[test]
fn double_click_still_reverts_to_copy() {
    let mut doc = lab_page();
    CopyHelper::default().attach(&mut doc);
    let mut clipboard = MemoryClipboard::new();
    let start = Instant::now();

    doc.click(2, &mut clipboard, start).unwrap();
    doc.click(2, &mut clipboard, start + Duration::from_millis(500)).unwrap();
    assert_eq!(clipboard.writes(), 2);

    doc.tick(start + Duration::from_millis(2600));
    assert_eq!(doc.blocks[2].copy_button.as_ref().unwrap().label(), COPY_LABEL);
}

// ---------------------------------------------------------------------------
// Navigation persistence
// ---------------------------------------------------------------------------

fn menu() -> NavMenu {
    NavMenu::new(vec![
        NavSection::new("getting-started"),
        NavSection::new("labs"),
        NavSection::anonymous(),
    ])
}

#[test]
fn collapsed_section_survives_a_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nav-state.json");
    let mut store = NavStore::load(&path).unwrap();
    let mut page = menu();

    assert_eq!(page.toggle(1, &mut store).unwrap(), NavState::Collapsed);
    store.save().unwrap();

    let reloaded_store = NavStore::load(&path).unwrap();
    let mut reloaded = menu();
    assert_eq!(reloaded.restore(&reloaded_store), 1);
    assert!(!reloaded.sections[0].is_collapsed());
    assert!(reloaded.sections[1].is_collapsed());
    assert!(reloaded.sections[1].header_collapsed);
}

#[test]
fn toggling_twice_round_trips_through_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nav-state.json");
    let mut store = NavStore::load(&path).unwrap();
    let mut page = menu();
    let labs = SectionId::new("labs");

    page.toggle(1, &mut store).unwrap();
    page.toggle(1, &mut store).unwrap();
    store.save().unwrap();

    let reloaded = NavStore::load(&path).unwrap();
    assert_eq!(reloaded.get(&labs), Some(NavState::Open));
    assert!(!page.sections[1].is_collapsed());

    let mut fresh = menu();
    assert_eq!(fresh.restore(&reloaded), 0);
}

#[test]
fn browser_storage_export_restores_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nav-state.json");
    std::fs::write(
        &path,
        r#"{"nav-section-getting-started": "collapsed", "nav-section-labs": "open"}"#,
    )
    .unwrap();

    let store = NavStore::load(&path).unwrap();
    let mut page = menu();
    assert_eq!(page.restore(&store), 1);
    assert!(page.sections[0].is_collapsed());

    store.save().unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"version\": 1"));
    assert!(raw.contains("\"getting-started\": \"collapsed\""));
}

#[test]
fn anonymous_sections_never_reach_the_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nav-state.json");
    let mut store = NavStore::load(&path).unwrap();
    let mut page = menu();

    page.toggle(2, &mut store).unwrap();
    assert!(page.sections[2].is_collapsed());
    assert!(store.is_empty());
}
