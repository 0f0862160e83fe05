use serde::Serialize;

use crate::analytics::{AnalyticsRequest, HistogramOptions, ProfileAxis, ProjectionAxis, Reduction};
use crate::model::ChannelKind;
use crate::windows::{EventKind, LifecycleEvent};

use super::menu::SHOW_MENU;
use super::{Service, ServiceContext, ServiceError, SetupContext};

/// Analysis views offered for the active document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilityView {
    Histogram,
    CumulativeHistogram,
    HorizontalProjection,
    VerticalProjection,
    PixelGrid,
    LineProfile,
    ColumnProfile,
}

impl UtilityView {
    pub const ALL: [UtilityView; 7] = [
        Self::Histogram,
        Self::CumulativeHistogram,
        Self::HorizontalProjection,
        Self::VerticalProjection,
        Self::PixelGrid,
        Self::LineProfile,
        Self::ColumnProfile,
    ];

    pub fn action_id(self) -> &'static str {
        match self {
            Self::Histogram => "show.histogram",
            Self::CumulativeHistogram => "show.cumulative_histogram",
            Self::HorizontalProjection => "show.horizontal_projection",
            Self::VerticalProjection => "show.vertical_projection",
            Self::PixelGrid => "show.pixel_grid",
            Self::LineProfile => "show.line_profile",
            Self::ColumnProfile => "show.column_profile",
        }
    }

    pub fn from_action(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.action_id() == id)
    }

    /// Request backing the view; the pixel grid reads samples directly.
    ///
    /// `index` selects the row or column of a profile, `value` the sample a
    /// projection counts.
    pub fn request(
        self,
        options: HistogramOptions,
        index: usize,
        value: u8,
    ) -> Option<AnalyticsRequest> {
        let request = match self {
            Self::Histogram => AnalyticsRequest::Histogram { options },
            Self::CumulativeHistogram => AnalyticsRequest::CumulativeHistogram,
            Self::HorizontalProjection => AnalyticsRequest::Projection {
                axis: ProjectionAxis::Horizontal,
                reduction: Reduction::CountOf(value),
            },
            Self::VerticalProjection => AnalyticsRequest::Projection {
                axis: ProjectionAxis::Vertical,
                reduction: Reduction::CountOf(value),
            },
            Self::LineProfile => AnalyticsRequest::Profile {
                axis: ProfileAxis::Row,
                index,
            },
            Self::ColumnProfile => AnalyticsRequest::Profile {
                axis: ProfileAxis::Column,
                index,
            },
            Self::PixelGrid => return None,
        };
        Some(request)
    }
}

/// Legend label keys for a channel layout.
pub fn channel_label_keys(layout: &[ChannelKind]) -> Vec<&'static str> {
    layout
        .iter()
        .map(|channel| match channel {
            ChannelKind::Black => "channel.black",
            ChannelKind::Red => "channel.red",
            ChannelKind::Green => "channel.green",
            ChannelKind::Blue => "channel.blue",
            ChannelKind::Alpha => "channel.alpha",
            ChannelKind::Luminance => "channel.luminance",
            ChannelKind::AlphaWeightedLuminance => "channel.alpha_weighted_luminance",
        })
        .collect()
}

/// The `show` menu; every view needs an active document.
#[derive(Debug, Default)]
pub struct UtilityService;

impl UtilityService {
    pub const NAME: &'static str = "utility";
}

impl Service for UtilityService {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn contribute(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        for view in UtilityView::ALL {
            setup.add_action(SHOW_MENU, view.action_id(), view.action_id(), false);
        }
        Ok(())
    }

    fn connect(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        setup.subscribe(EventKind::Activated);
        setup.subscribe(EventKind::Closed);
        Ok(())
    }

    fn on_event(
        &mut self,
        _event: &LifecycleEvent,
        context: &mut ServiceContext<'_>,
    ) -> Result<(), ServiceError> {
        let has_active = context.windows().active().is_some();
        for view in UtilityView::ALL {
            context.set_enabled(view.action_id(), has_active)?;
        }
        Ok(())
    }
}
