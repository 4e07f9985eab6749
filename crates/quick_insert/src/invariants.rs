use scribe_primitives::{Key, KeyCode};

use crate::catalog::CommandDescriptor;
use crate::config::QuickInsertOptions;
use crate::error::EffectError;
use crate::extension::{KeyDisposition, QuickInsert};
use crate::filter::CatalogItems;
use crate::host::{DocumentHost, EditorId, UserContext};
use crate::testing::{HostEvent, MemoryDocument, RecordingRenderer, init_tracing};

fn setup(text: &str) -> (MemoryDocument, QuickInsert<RecordingRenderer>) {
	init_tracing();
	let qi = QuickInsert::new(EditorId(0), QuickInsertOptions::default(), RecordingRenderer::default());
	(MemoryDocument::new(text), qi)
}

fn type_str(doc: &mut MemoryDocument, qi: &mut QuickInsert<RecordingRenderer>, s: &str) {
	for c in s.chars() {
		let tx = doc.type_text(&c.to_string());
		qi.on_change(doc, Some(tx.changes())).unwrap();
	}
}

/// Must keep at most one menu instance alive per editor.
///
/// - Enforced in: `OverlayController::open`, `OverlayController::close`
/// - Failure symptom: Stacked menus pile up after repeated open/close cycles.
#[cfg_attr(test, test)]
pub(crate) fn test_single_live_menu_instance() {
	let (mut doc, mut qi) = setup("");

	for cycle in 0..100 {
		type_str(&mut doc, &mut qi, " /");
		assert!(qi.is_open(), "cycle {cycle} did not open");
		type_str(&mut doc, &mut qi, "t");

		if cycle % 2 == 0 {
			assert_eq!(qi.on_key_down(&mut doc, &Key::new(KeyCode::Escape), None), Ok(KeyDisposition::Handled));
		} else {
			let tx = doc.backspace();
			qi.on_change(&doc, Some(tx.changes())).unwrap();
			let tx = doc.backspace();
			qi.on_change(&doc, Some(tx.changes())).unwrap();
		}
		assert!(!qi.is_open(), "cycle {cycle} did not close");
	}

	let r = qi.renderer();
	assert_eq!(r.mounts, 100);
	assert_eq!(r.destroys, 100);
	assert_eq!(r.peak_live, 1);
	assert_eq!(r.live_instances(), 0);
}

/// Must never mount a menu while the document is read-only.
///
/// - Enforced in: `TriggerDetector::on_change`, `OverlayController::open`
/// - Failure symptom: Command menu appears in a document the user cannot edit.
#[cfg_attr(test, test)]
pub(crate) fn test_read_only_never_mounts() {
	let (mut doc, mut qi) = setup("");
	doc.set_editable(false);

	type_str(&mut doc, &mut qi, "/ /t\n/");
	assert_eq!(qi.renderer().mounts, 0);
	assert_eq!(qi.span(), None);
}

/// Must destroy the menu exactly once on Escape and swallow the key.
///
/// - Enforced in: `OverlayController::key_down`, `QuickInsert::on_key_down`
/// - Failure symptom: Escape also leaves editor mode, or the renderer sees a double destroy.
#[cfg_attr(test, test)]
pub(crate) fn test_escape_destroys_once() {
	let (mut doc, mut qi) = setup("");
	type_str(&mut doc, &mut qi, "/co");

	let escape = Key::new(KeyCode::Escape);
	assert_eq!(qi.on_key_down(&mut doc, &escape, None), Ok(KeyDisposition::Handled));
	assert_eq!(qi.on_key_down(&mut doc, &escape, None), Ok(KeyDisposition::Unhandled));
	qi.on_blur();
	assert_eq!(qi.renderer().destroys, 1);
}

/// Must keep the overlay open exactly while a match span exists.
///
/// - Enforced in: `QuickInsert::on_change`, `QuickInsert::show`
/// - Failure symptom: Menu lingers after the trigger is gone, or typing filters an invisible menu.
#[cfg_attr(test, test)]
pub(crate) fn test_open_iff_span() {
	let (mut doc, mut qi) = setup("draft ");

	let check = |qi: &QuickInsert<RecordingRenderer>, step: &str| {
		assert_eq!(qi.is_open(), qi.span().is_some(), "after {step}");
	};

	type_str(&mut doc, &mut qi, "/he");
	check(&qi, "typing");

	doc.set_geometry_available(false);
	type_str(&mut doc, &mut qi, "a");
	check(&qi, "unmeasurable update");
	doc.set_geometry_available(true);

	type_str(&mut doc, &mut qi, " /");
	check(&qi, "reopen");

	qi.renderer_mut().fail_update = true;
	let tx = doc.type_text("x");
	assert!(qi.on_change(&doc, Some(tx.changes())).is_err());
	check(&qi, "failed update");
	qi.renderer_mut().fail_update = false;

	type_str(&mut doc, &mut qi, " /");
	doc.move_cursor(0);
	qi.on_change(&doc, None).unwrap();
	check(&qi, "caret left");

	type_str(&mut doc, &mut qi, "/");
	qi.renderer_mut().fail_update = true;
	assert!(qi.on_key_down(&mut doc, &Key::new(KeyCode::Down), None).is_err());
	check(&qi, "failed navigation");
}

fn saw_deletion(host: &mut dyn DocumentHost, _: Option<&UserContext>) -> Result<(), EffectError> {
	if host.text().chars().any(|c| c == '/') {
		return Err(EffectError::Failed("trigger text still present".into()));
	}
	Ok(())
}

static PROBE: &[CommandDescriptor] = &[CommandDescriptor {
	key: "probe",
	label: "Probe",
	icon: "",
	effect: saw_deletion,
}];

/// Must remove the trigger span before running the command effect.
///
/// - Enforced in: `CommandExecutor::execute`
/// - Failure symptom: Inserted blocks contain the typed "/query" text.
#[cfg_attr(test, test)]
pub(crate) fn test_deletion_precedes_effect() {
	init_tracing();
	let options = QuickInsertOptions::default().with_items(CatalogItems::new(PROBE));
	let mut qi = QuickInsert::new(EditorId(0), options, RecordingRenderer::default());
	let mut doc = MemoryDocument::new("x ");
	type_str(&mut doc, &mut qi, "/pr");

	assert_eq!(qi.on_key_down(&mut doc, &Key::new(KeyCode::Enter), None), Ok(KeyDisposition::Handled));
	assert_eq!(doc.events().first(), Some(&HostEvent::Dispatched { text_after: "x ".into() }));
	assert_eq!(doc.focus_count(), 1);
}
