//! The user commands: build a junction box, flip a selection, re-index a selection.
//!
//! Each command asks the host for input through [`Prompt`], runs to completion
//! and returns. A cancelled prompt ends the command without touching the drawing.

use log::{error, info, warn};

use crate::{
    cad::{Drawing, Handle},
    config::DrawingConfig,
    draw::draw_cable,
    error::CommandError,
    flip::{flip, FlipSummary},
    layout::{place, spare},
    reindex::{reindex, ReindexSummary},
    schedule::read_cables,
    session::BuildSession,
    sheet::Workbook,
};

/// User interaction the commands need from the host
pub trait Prompt {
    type Workbook: Workbook;

    /// Run the build dialog over `session`. `false` when the user cancels.
    fn build_dialog(&mut self, session: &mut BuildSession<Self::Workbook>) -> bool;

    /// Entities the user picked on screen, `None` when cancelled.
    fn selection(&mut self) -> Option<Vec<Handle>>;

    fn starting_terminal(&mut self) -> Option<i64>;

    /// Show a blocking message.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildSummary {
    pub boxes: usize,
    pub cables: usize,
}

/// Extract, sort, place and draw the junction box(es) chosen in the build dialog.
///
/// Every chosen junction is read before anything is drawn, so a bad workbook
/// leaves the drawing untouched.
pub fn build_junction_box<P: Prompt>(
    prompt: &mut P,
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
) -> Result<Outcome<BuildSummary>, CommandError> {
    let mut session = BuildSession::new();
    if !prompt.build_dialog(&mut session) {
        return Ok(Outcome::Cancelled);
    }
    let Some(request) = session.accept() else {
        return Ok(Outcome::Cancelled);
    };

    let mut boxes = Vec::with_capacity(request.junction_tags.len());
    for tag in &request.junction_tags {
        let mut cables = read_cables(&request.workbook, tag)?;
        cables.sort();
        if !spare(&cables, request.enclosure).fits() {
            warn!("{tag}: cables do not fit a {}", request.enclosure.name());
        }
        boxes.push((tag, cables));
    }

    let mut summary = BuildSummary::default();
    for (index, (tag, cables)) in (0..).zip(&boxes) {
        let placements = place(cables, request.enclosure, config, index);
        for (cable, placement) in cables.iter().zip(&placements) {
            draw_cable(drawing, config, cable, placement, tag)?;
        }
        info!("{tag}: drew {} cables", cables.len());
        summary.boxes += 1;
        summary.cables += cables.len();
    }
    Ok(Outcome::Done(summary))
}

pub fn flip_selection<P: Prompt>(
    prompt: &mut P,
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
) -> Result<Outcome<FlipSummary>, CommandError> {
    let Some(selection) = prompt.selection() else {
        return Ok(Outcome::Cancelled);
    };
    let summary = flip(drawing, config, &selection)?;
    info!("flipped {} entities, skipped {}", summary.mirrored, summary.skipped);
    Ok(Outcome::Done(summary))
}

pub fn reindex_selection<P: Prompt>(
    prompt: &mut P,
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
) -> Result<Outcome<ReindexSummary>, CommandError> {
    let Some(selection) = prompt.selection() else {
        return Ok(Outcome::Cancelled);
    };
    let Some(starting_terminal) = prompt.starting_terminal() else {
        return Ok(Outcome::Cancelled);
    };
    let summary = reindex(drawing, config, &selection, starting_terminal)?;
    info!(
        "re-indexed {} terminations from terminal {starting_terminal}, skipped {}",
        summary.relabeled, summary.skipped
    );
    Ok(Outcome::Done(summary))
}

/// Report the result of a command to the user once.
pub fn present<P: Prompt, T>(
    prompt: &mut P,
    result: Result<Outcome<T>, CommandError>,
) -> Option<T> {
    match result {
        Ok(Outcome::Done(value)) => Some(value),
        Ok(Outcome::Cancelled) => {
            info!("Canceled.");
            None
        }
        Err(e) => {
            error!("{e}");
            prompt.alert(&e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cad::{MemoryDrawing, Point},
        error::ScheduleError,
        schedule::tests::workbook,
        session::TagChoice,
        sheet::MemoryWorkbook,
    };
    use rstest::*;

    #[derive(Default)]
    struct Scripted {
        workbook: Option<MemoryWorkbook>,
        tag: Option<TagChoice>,
        selection: Option<Vec<Handle>>,
        starting_terminal: Option<i64>,
        alerts: Vec<String>,
    }

    impl Prompt for Scripted {
        type Workbook = MemoryWorkbook;

        fn build_dialog(&mut self, session: &mut BuildSession<MemoryWorkbook>) -> bool {
            let Some(workbook) = self.workbook.take() else {
                return false;
            };
            if session.load_workbook(workbook).is_err() {
                return false;
            }
            if let Some(tag) = self.tag.take() {
                if session.select_tag(tag).is_err() {
                    return false;
                }
            }
            true
        }

        fn selection(&mut self) -> Option<Vec<Handle>> {
            self.selection.clone()
        }

        fn starting_terminal(&mut self) -> Option<i64> {
            self.starting_terminal
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_owned());
        }
    }

    fn building(workbook: MemoryWorkbook, tag: TagChoice) -> Scripted {
        Scripted {
            workbook: Some(workbook),
            tag: Some(tag),
            ..Scripted::default()
        }
    }

    #[rstest]
    fn builds_sorted_cables_for_one_junction(workbook: MemoryWorkbook) {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::with_junction_symbols(&config);
        let mut prompt = building(workbook, TagChoice::One("IJB-1".to_owned()));

        let result = build_junction_box(&mut prompt, &mut drawing, &config);
        let summary = present(&mut prompt, result).unwrap();
        assert_eq!(summary, BuildSummary { boxes: 1, cables: 3 });

        let junctions = drawing.instances_of("Junction Termination");
        let first_tags: Vec<_> = junctions
            .iter()
            .map(|&h| drawing.label(h, "FLDTAG1").unwrap())
            .collect();
        // FT 400 and TT 200 (control) on table 1, SDV 60A (safety) moved to table 2
        assert_eq!(first_tags, ["IJB-1-TB1(1)", "IJB-1-TB1(7)", "IJB-1-TB2(1)"]);
        assert_eq!(drawing.position(junctions[1]).unwrap(), Point::new(50.0, -1.5));
        assert_eq!(
            drawing.property(junctions[2], "Flip state1").unwrap(),
            crate::cad::PropertyValue::Short(1)
        );
        assert!(prompt.alerts.is_empty());
    }

    #[rstest]
    fn select_all_spaces_boxes(workbook: MemoryWorkbook) {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::with_junction_symbols(&config);
        let mut prompt = building(workbook, TagChoice::All);

        let summary = build_junction_box(&mut prompt, &mut drawing, &config).unwrap();
        assert_eq!(summary, Outcome::Done(BuildSummary { boxes: 2, cables: 4 }));

        let pt = drawing
            .instances_of("Junction Termination")
            .into_iter()
            .find(|&h| drawing.label(h, "FLDTAG1").unwrap().starts_with("IJB-2"))
            .unwrap();
        assert_eq!(drawing.position(pt).unwrap(), Point::new(150.0, 0.0));
    }

    #[rstest]
    fn cancelled_dialog_draws_nothing(workbook: MemoryWorkbook) {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::with_junction_symbols(&config);

        let mut prompt = Scripted::default();
        let result = build_junction_box(&mut prompt, &mut drawing, &config);
        assert_eq!(result.unwrap(), Outcome::Cancelled);

        let mut prompt = Scripted {
            workbook: Some(workbook),
            ..Scripted::default()
        };
        let result = build_junction_box(&mut prompt, &mut drawing, &config);
        assert!(present(&mut prompt, result).is_none());
        assert!(drawing.handles().is_empty());
        assert!(prompt.alerts.is_empty());
    }

    #[rstest]
    fn missing_symbols_abort_the_build(workbook: MemoryWorkbook) {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::new();
        let mut prompt = building(workbook, TagChoice::One("IJB-2".to_owned()));

        let result = build_junction_box(&mut prompt, &mut drawing, &config);
        assert!(matches!(result, Err(CommandError::Cad(_))));
        assert!(present(&mut prompt, result).is_none());
        assert_eq!(prompt.alerts, ["symbol Junction Termination not found"]);
    }

    #[test]
    fn extraction_errors_are_presented() {
        let mut prompt = Scripted::default();
        let err = CommandError::from(ScheduleError::UnknownDevice("PT 2".to_owned()));
        assert!(present::<_, BuildSummary>(&mut prompt, Err(err)).is_none());
        assert_eq!(
            prompt.alerts,
            ["Excel file is not compatible: Device PT 2 referenced in schedule has no IO-list entry"]
        );
    }

    #[test]
    fn flip_and_reindex_use_the_selection() {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::with_junction_symbols(&config);
        let junction = drawing
            .insert_symbol("Junction Termination", Point::new(50.0, 0.0))
            .unwrap();
        for slot in 1..=9 {
            drawing
                .set_label(junction, &crate::label::slot_attribute(slot), "JB-TB1(0)")
                .unwrap();
        }
        let text = drawing.add_entity(crate::cad::EntityKind::Text, Point::new(40.0, 0.0));

        let mut prompt = Scripted {
            selection: Some(vec![junction, text]),
            starting_terminal: Some(20),
            ..Scripted::default()
        };
        let flipped = flip_selection(&mut prompt, &mut drawing, &config).unwrap();
        assert_eq!(flipped, Outcome::Done(FlipSummary { mirrored: 2, skipped: 0 }));
        assert_eq!(drawing.position(text).unwrap(), Point::new(60.0, 0.0));

        let reindexed = reindex_selection(&mut prompt, &mut drawing, &config).unwrap();
        assert_eq!(reindexed, Outcome::Done(ReindexSummary { relabeled: 1, skipped: 1 }));
        assert_eq!(drawing.label(junction, "FLDTAG1").unwrap(), "JB-TB1(20)");
    }

    #[test]
    fn missing_reference_fails_the_command() {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::with_junction_symbols(&config);
        let mut prompt = Scripted {
            selection: Some(Vec::new()),
            starting_terminal: Some(1),
            ..Scripted::default()
        };
        let result = reindex_selection(&mut prompt, &mut drawing, &config);
        assert!(present(&mut prompt, result).is_none());
        assert_eq!(prompt.alerts, ["No junction termination in selection"]);
    }

    #[test]
    fn cancelled_prompts_are_no_ops() {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::with_junction_symbols(&config);
        let mut prompt = Scripted::default();
        assert_eq!(
            flip_selection(&mut prompt, &mut drawing, &config).unwrap(),
            Outcome::Cancelled
        );

        prompt.selection = Some(Vec::new());
        assert_eq!(
            reindex_selection(&mut prompt, &mut drawing, &config).unwrap(),
            Outcome::Cancelled
        );
    }
}
