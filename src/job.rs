//! Label jobs: what to print and how

use crate::error::ValidationError;
use crate::geometry::LabelGeometry;
use crate::layout::PageLayoutPolicy;
use crate::profile::PrinterProfile;
use crate::sequence::{self, LabelInstance};
use crate::style::{BorderStyle, Typography};
use tracing::trace;

/// A validated, immutable print job
#[derive(Debug, Clone, PartialEq)]
pub struct LabelJob {
    pairs: Vec<(String, u32)>,
    geometry: LabelGeometry,
    typography: Typography,
    layout: PageLayoutPolicy,
    profile: PrinterProfile,
    lines_per_label: u32,
    border: Option<BorderStyle>,
}

impl LabelJob {
    pub fn builder() -> LabelJobBuilder {
        LabelJobBuilder::new()
    }

    /// Identifiers and quantities in input order
    pub fn pairs(&self) -> &[(String, u32)] {
        &self.pairs
    }

    pub fn geometry(&self) -> &LabelGeometry {
        &self.geometry
    }

    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    pub fn layout(&self) -> &PageLayoutPolicy {
        &self.layout
    }

    pub fn profile(&self) -> &PrinterProfile {
        &self.profile
    }

    pub fn lines_per_label(&self) -> u32 {
        self.lines_per_label
    }

    /// Border drawn around every label, if enabled
    pub fn border(&self) -> Option<&BorderStyle> {
        self.border.as_ref()
    }

    /// Number of physical labels after quantity expansion
    pub fn total_labels(&self) -> usize {
        sequence::total_labels(&self.pairs)
    }

    /// One instance per physical label, in print order
    pub fn instances(&self) -> Vec<LabelInstance<'_>> {
        sequence::expand(&self.pairs)
    }
}

/// Builder for [`LabelJob`]; `build` checks every invariant
#[derive(Debug, Clone)]
pub struct LabelJobBuilder {
    pairs: Vec<(String, u32)>,
    geometry: LabelGeometry,
    typography: Typography,
    layout: PageLayoutPolicy,
    profile: PrinterProfile,
    lines_per_label: u32,
    border: Option<BorderStyle>,
}

impl LabelJobBuilder {
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            geometry: LabelGeometry::default(),
            typography: Typography::default(),
            layout: PageLayoutPolicy::per_row(4, 155.0),
            profile: PrinterProfile::default(),
            lines_per_label: 4,
            border: None,
        }
    }

    /// Add one identifier with its quantity
    pub fn label<S: Into<String>>(mut self, identifier: S, quantity: u32) -> Self {
        let identifier = identifier.into();
        trace!("Adding label '{}' x{}", identifier, quantity);
        self.pairs.push((identifier, quantity));
        self
    }

    /// Add several identifiers with their quantities
    pub fn labels<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        self.pairs
            .extend(pairs.into_iter().map(|(id, qty)| (id.into(), qty)));
        self
    }

    pub fn geometry(mut self, geometry: LabelGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    pub fn layout(mut self, layout: PageLayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    pub fn profile(mut self, profile: PrinterProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn lines_per_label(mut self, lines: u32) -> Self {
        self.lines_per_label = lines;
        self
    }

    /// Draw the default border around each label
    pub fn show_border(mut self, show: bool) -> Self {
        self.border = show.then(BorderStyle::default);
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    /// Validate and freeze the job
    pub fn build(self) -> Result<LabelJob, ValidationError> {
        if self.pairs.is_empty() {
            return Err(ValidationError::EmptyJob);
        }

        let mut pairs = Vec::with_capacity(self.pairs.len());
        for (position, (identifier, quantity)) in self.pairs.into_iter().enumerate() {
            let identifier = identifier.trim();
            if identifier.is_empty() {
                return Err(ValidationError::EmptyIdentifier(position));
            }
            if quantity == 0 {
                return Err(ValidationError::ZeroQuantity(identifier.to_string()));
            }
            pairs.push((identifier.to_string(), quantity));
        }

        if self.lines_per_label == 0 {
            return Err(ValidationError::ZeroCount("lines per label"));
        }
        self.geometry.validate()?;
        self.profile.validate(&self.geometry, self.lines_per_label)?;
        self.typography.validate()?;
        self.layout.validate()?;
        if let Some(border) = &self.border {
            crate::geometry::positive("border width", border.width)?;
        }

        Ok(LabelJob {
            pairs,
            geometry: self.geometry,
            typography: self.typography,
            layout: self.layout,
            profile: self.profile,
            lines_per_label: self.lines_per_label,
            border: self.border,
        })
    }
}

impl Default for LabelJobBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Margins;

    #[test]
    fn test_build_trims_identifiers() {
        let job = LabelJob::builder()
            .label("  W-100 ", 2)
            .labels(vec![("W-101", 1)])
            .build()
            .unwrap();
        assert_eq!(
            job.pairs(),
            &[("W-100".to_string(), 2), ("W-101".to_string(), 1)]
        );
        assert_eq!(job.total_labels(), 3);
        assert_eq!(job.instances()[1].text, "W-100");
    }

    #[test]
    fn test_empty_job_is_rejected() {
        assert_eq!(
            LabelJob::builder().build().unwrap_err(),
            ValidationError::EmptyJob
        );
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let err = LabelJob::builder()
            .label("A", 1)
            .label("   ", 1)
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyIdentifier(1));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let err = LabelJob::builder().label("A", 0).build().unwrap_err();
        assert_eq!(err, ValidationError::ZeroQuantity("A".to_string()));
    }

    #[test]
    fn test_zero_lines_is_rejected() {
        let err = LabelJob::builder()
            .label("A", 1)
            .lines_per_label(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::ZeroCount("lines per label"));
    }

    #[test]
    fn test_component_validation_runs() {
        let bad_geometry = LabelGeometry::new(50.0, 3.0).with_margins(Margins::uniform(2.0));
        assert!(matches!(
            LabelJob::builder()
                .label("A", 1)
                .geometry(bad_geometry)
                .build(),
            Err(ValidationError::NoTextArea { .. })
        ));
        assert!(
            LabelJob::builder()
                .label("A", 1)
                .typography(Typography::new("Arial", -2.0))
                .build()
                .is_err()
        );
        assert!(
            LabelJob::builder()
                .label("A", 1)
                .layout(PageLayoutPolicy::per_row(0, 10.0))
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_wide_format_text_area_is_checked() {
        let err = LabelJob::builder()
            .label("W-1", 1)
            .geometry(LabelGeometry::new(60.0, 0.8).with_margins(Margins::uniform(0.0)))
            .profile(PrinterProfile::WideFormat)
            .lines_per_label(2)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NoTextArea {
                printable_height: 0.8,
                top: 0.5,
                bottom: 0.5,
            }
        );
    }

    #[test]
    fn test_border_toggle() {
        let job = LabelJob::builder()
            .label("A", 1)
            .show_border(true)
            .build()
            .unwrap();
        assert_eq!(job.border(), Some(&BorderStyle::default()));
    }
}
