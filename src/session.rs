//! State of one build dialog, from opening a workbook to accepting a size.

use log::debug;

use crate::{
    cable::Cable,
    error::ScheduleError,
    layout::{spare, Enclosure, Spare},
    schedule::{read_cables, read_junction_tags},
    sheet::Workbook,
};

/// Junction box(es) the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChoice {
    One(String),
    All,
}

/// An enclosure offered in the dialog with its spare terminals for the current tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeOption {
    pub enclosure: Enclosure,
    pub spare: Spare,
}

impl SizeOption {
    pub fn label(&self) -> String {
        let name = self.enclosure.name();
        match self.spare {
            Spare::Terminals(n) => format!("{name} - {n} Spare"),
            Spare::DoesNotFit => format!("{name} - Doesn't Fit"),
            Spare::Unchecked => name.to_owned(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.spare.fits()
    }
}

/// What an accepted dialog hands to the build
#[derive(Debug)]
pub struct BuildRequest<W> {
    pub workbook: W,
    pub junction_tags: Vec<String>,
    pub enclosure: Enclosure,
}

/// Every size at full capacity, then the unchecked custom size.
fn unselected_sizes() -> Vec<SizeOption> {
    Enclosure::STANDARD
        .iter()
        .map(|&enclosure| SizeOption {
            enclosure,
            spare: Spare::Terminals(enclosure.capacity().unwrap_or(0)),
        })
        .chain([SizeOption {
            enclosure: Enclosure::Custom,
            spare: Spare::Unchecked,
        }])
        .collect()
}

#[derive(Debug)]
pub struct BuildSession<W> {
    workbook: Option<W>,
    junction_tags: Vec<String>,
    choice: Option<TagChoice>,
    sizes: Vec<SizeOption>,
    enclosure: Option<Enclosure>,
}

impl<W> Default for BuildSession<W> {
    fn default() -> Self {
        Self {
            workbook: None,
            junction_tags: Vec::new(),
            choice: None,
            sizes: unselected_sizes(),
            enclosure: None,
        }
    }
}

impl<W: Workbook> BuildSession<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the workbook and forget every earlier selection.
    pub fn load_workbook(&mut self, workbook: W) -> Result<&[String], ScheduleError> {
        let tags = read_junction_tags(&workbook)?;
        debug!("workbook has {} junction tags", tags.len());
        *self = Self {
            workbook: Some(workbook),
            junction_tags: tags,
            ..Self::default()
        };
        Ok(&self.junction_tags)
    }

    pub fn junction_tags(&self) -> &[String] {
        &self.junction_tags
    }

    pub fn choice(&self) -> Option<&TagChoice> {
        self.choice.as_ref()
    }

    pub fn sizes(&self) -> &[SizeOption] {
        &self.sizes
    }

    pub fn enclosure(&self) -> Option<Enclosure> {
        self.enclosure
    }

    fn chosen_tags(&self, choice: &TagChoice) -> Vec<String> {
        match choice {
            TagChoice::One(tag) => vec![tag.clone()],
            TagChoice::All => self.junction_tags.clone(),
        }
    }

    fn tightest(boxes: &[Vec<Cable>], enclosure: Enclosure) -> Spare {
        boxes
            .iter()
            .map(|cables| spare(cables, enclosure))
            .min_by_key(|s| match s {
                Spare::DoesNotFit => (0, 0),
                Spare::Terminals(n) => (1, *n),
                Spare::Unchecked => (2, 0),
            })
            .unwrap_or_else(|| spare(&[], enclosure))
    }

    /// Choose the junction tag(s) and refresh the spare count of every size.
    ///
    /// The first size that fits becomes the selected one.
    pub fn select_tag(&mut self, choice: TagChoice) -> Result<&[SizeOption], ScheduleError> {
        let Some(workbook) = &self.workbook else {
            return Ok(&self.sizes);
        };
        let boxes = self
            .chosen_tags(&choice)
            .iter()
            .map(|tag| {
                let mut cables = read_cables(workbook, tag)?;
                cables.sort();
                Ok(cables)
            })
            .collect::<Result<Vec<_>, ScheduleError>>()?;

        self.sizes = unselected_sizes()
            .into_iter()
            .map(|option| SizeOption {
                spare: Self::tightest(&boxes, option.enclosure),
                ..option
            })
            .collect();
        self.enclosure = self
            .sizes
            .iter()
            .find(|option| option.enabled())
            .map(|option| option.enclosure);
        debug!("{choice:?}: {:?}", self.sizes);
        self.choice = Some(choice);
        Ok(&self.sizes)
    }

    /// Select `enclosure`; sizes that do not fit stay unselectable.
    pub fn select_size(&mut self, enclosure: Enclosure) -> bool {
        let enabled = self
            .sizes
            .iter()
            .any(|option| option.enclosure == enclosure && option.enabled());
        if enabled {
            self.enclosure = Some(enclosure);
        }
        enabled
    }

    /// Close the dialog with OK. `None` unless a workbook, a tag and a size are chosen.
    pub fn accept(self) -> Option<BuildRequest<W>> {
        let choice = self.choice.as_ref()?;
        let junction_tags = self.chosen_tags(choice);
        Some(BuildRequest {
            workbook: self.workbook?,
            junction_tags,
            enclosure: self.enclosure?,
        })
    }
}
