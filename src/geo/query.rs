//! Sunrise/sunset face state: event selection and digit-by-digit location editing.
//!
//! The face has three pages. Page 0 shows the resolved event; pages 1 and 2 edit
//! the latitude and longitude one digit at a time. Edits are kept in working
//! coordinates and written to the [`LocationStore`] when the cursor leaves a
//! page or the face resigns. Nothing here formats display text: the host renders
//! [`SolarReport`] and [`EditSummary`] values.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;

use super::coordinate::{Axis, Digit, EditableCoordinate};
use super::location::{Location, LocationStore};
use super::resolver::{EventFocus, SolarEventResolver, SolarReport};
use super::solar::SolarAlgorithm;
use crate::common::constants::EDIT_CURSOR_POSITIONS;

/// Face page, in the order the cursor visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Events,
    Latitude,
    Longitude,
}

impl Page {
    fn next(self) -> Self {
        match self {
            Page::Events => Page::Latitude,
            Page::Latitude => Page::Longitude,
            Page::Longitude => Page::Events,
        }
    }

    /// The coordinate edited on this page.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Page::Events => None,
            Page::Latitude => Some(Axis::Latitude),
            Page::Longitude => Some(Axis::Longitude),
        }
    }
}

/// What the settings pages should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditSummary {
    pub page: Page,
    pub axis: Axis,
    pub active_digit: Digit,
    pub value_centidegrees: i16,
    /// The active digit is blanked during this half of the blink cycle.
    pub cursor_hidden: bool,
}

/// Owned state of one sunrise/sunset face instance.
#[derive(Debug, Clone)]
pub struct SolarEventQuery {
    page: Page,
    active_digit: Digit,
    latitude: EditableCoordinate,
    longitude: EditableCoordinate,
    committed: Location,
    location_changed: bool,
    focus: EventFocus,
}

impl Default for SolarEventQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarEventQuery {
    pub fn new() -> Self {
        Self {
            page: Page::Events,
            active_digit: Digit::Sign,
            latitude: EditableCoordinate::decode(0, Axis::Latitude),
            longitude: EditableCoordinate::decode(0, Axis::Longitude),
            committed: Location::UNSET,
            location_changed: false,
            focus: EventFocus::Upcoming,
        }
    }

    /// Load the stored location into the working coordinates.
    pub fn activate(&mut self, store: &impl LocationStore) -> Result<()> {
        let location = store
            .location()
            .context("Failed to read the stored location")?;
        self.load(location);
        Ok(())
    }

    fn load(&mut self, location: Location) {
        self.latitude =
            EditableCoordinate::decode(location.latitude_centidegrees(), Axis::Latitude);
        self.longitude =
            EditableCoordinate::decode(location.longitude_centidegrees(), Axis::Longitude);
        self.committed = location;
        self.location_changed = false;
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn focus(&self) -> EventFocus {
        self.focus
    }

    pub fn active_digit(&self) -> Digit {
        self.active_digit
    }

    /// The location last loaded or written to the store.
    pub fn location(&self) -> Location {
        self.committed
    }

    /// The location as currently edited, possibly not yet committed.
    pub fn working_location(&self) -> Location {
        Location::new(self.latitude.encode(), self.longitude.encode())
    }

    pub fn has_pending_changes(&self) -> bool {
        self.location_changed
    }

    /// Flip between the upcoming event and the one after it. Only on the event page.
    pub fn toggle_event(&mut self) -> bool {
        if self.page != Page::Events {
            return false;
        }
        self.focus = self.focus.toggled();
        true
    }

    /// Open the latitude page with the cursor on the sign.
    pub fn enter_settings(&mut self) -> bool {
        if self.page != Page::Events {
            return false;
        }
        self.page = Page::Latitude;
        self.active_digit = Digit::Sign;
        true
    }

    /// Move the cursor to the next editable digit.
    ///
    /// The latitude page has no hundreds digit. Moving past the last digit opens
    /// the next page and commits the working location if it changed.
    pub fn advance_cursor(&mut self, store: &mut impl LocationStore) -> Result<()> {
        if self.page == Page::Events {
            return Ok(());
        }

        let mut next = self.active_digit.index() + 1;
        if self.page == Page::Latitude && next == Digit::Hundreds.index() {
            next += 1;
        }

        match Digit::from_index(next).filter(|_| next < EDIT_CURSOR_POSITIONS) {
            Some(digit) => self.active_digit = digit,
            None => {
                self.active_digit = Digit::Sign;
                self.page = self.page.next();
                self.commit(store)?;
            }
        }
        Ok(())
    }

    /// Increment the digit under the cursor, or toggle the sign.
    pub fn increment_active_digit(&mut self) -> bool {
        let coordinate = match self.page {
            Page::Events => return false,
            Page::Latitude => &mut self.latitude,
            Page::Longitude => &mut self.longitude,
        };
        coordinate.increment_digit(self.active_digit);
        self.location_changed = true;
        true
    }

    /// Leave the face: back to the event page, commit pending edits.
    pub fn resign(&mut self, store: &mut impl LocationStore) -> Result<()> {
        self.page = Page::Events;
        self.active_digit = Digit::Sign;
        self.focus = EventFocus::Upcoming;
        self.commit(store)
    }

    fn commit(&mut self, store: &mut impl LocationStore) -> Result<()> {
        if !self.location_changed {
            return Ok(());
        }

        let location = self.working_location();
        store
            .save_location(location.pack())
            .context("Failed to store the edited location")?;
        log_debug!("Location committed: {location}");

        self.committed = location;
        self.location_changed = false;
        Ok(())
    }

    /// Settings-page summary for a given sub-second tick, `None` on the event page.
    pub fn edit_summary(&self, subsecond: u8) -> Option<EditSummary> {
        let axis = self.page.axis()?;
        let coordinate = match axis {
            Axis::Latitude => &self.latitude,
            Axis::Longitude => &self.longitude,
        };
        Some(EditSummary {
            page: self.page,
            axis,
            active_digit: self.active_digit,
            value_centidegrees: coordinate.encode(),
            cursor_hidden: subsecond % 2 == 1,
        })
    }

    /// Resolve the event to show for the committed location.
    pub fn report<A: SolarAlgorithm + ?Sized>(
        &self,
        now: NaiveDateTime,
        offset_minutes: i32,
        algorithm: &A,
    ) -> SolarReport {
        SolarEventResolver::new(algorithm).resolve(now, self.committed, offset_minutes, self.focus)
    }
}
