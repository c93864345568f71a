//! Cursor over the pending review tasks shown in the modal.

use crate::format::parse_leading_float;
use crate::models::Task;

/// Result of moving past the current task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselStep {
    /// Another task is now current.
    Next,
    /// Every task has been handled; the modal should close.
    Finished,
}

/// Ordered, read-only task list plus a forward-only cursor.
///
/// The cursor stays within `[0, len]`; `len` means exhausted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskCarousel {
    tasks: Vec<Task>,
    index: usize,
}

impl TaskCarousel {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Task> {
        self.tasks.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.tasks.len()
    }

    /// `"Tarea 2 de 5"` for the current task.
    pub fn counter_label(&self) -> Option<String> {
        self.current()
            .map(|_| format!("Tarea {} de {}", self.index + 1, self.tasks.len()))
    }

    /// Move past the current task. Never goes back, never overshoots.
    pub fn advance(&mut self) -> CarouselStep {
        if self.index < self.tasks.len() {
            self.index += 1;
        }
        if self.is_finished() {
            CarouselStep::Finished
        } else {
            CarouselStep::Next
        }
    }
}

/// Visibility and in-flight state of the review modal.
///
/// Once closed, the modal stays closed: a response that lands afterwards
/// does not reopen it. Only one response is in flight at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewModal {
    carousel: Option<TaskCarousel>,
    busy: bool,
}

impl ReviewModal {
    /// Open on `carousel`; an exhausted carousel leaves the modal closed.
    pub fn open(carousel: TaskCarousel) -> Self {
        Self {
            carousel: (!carousel.is_finished()).then_some(carousel),
            busy: false,
        }
    }

    pub fn carousel(&self) -> Option<&TaskCarousel> {
        self.carousel.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.carousel.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claim the current task for a request. Returns a working copy of the
    /// carousel, or `None` when closed or a request is already in flight.
    pub fn begin(&mut self) -> Option<TaskCarousel> {
        if self.busy {
            return None;
        }
        let working = self.carousel.clone()?;
        self.busy = true;
        Some(working)
    }

    /// The request started by [`begin`](Self::begin) ended. `advanced` is
    /// the working copy after a successful response, `None` after a failure.
    pub fn finish(&mut self, advanced: Option<TaskCarousel>) {
        self.busy = false;
        let Some(advanced) = advanced else {
            return;
        };
        if self.carousel.is_some() {
            self.carousel = (!advanced.is_finished()).then_some(advanced);
        }
    }

    /// Discard the carousel for this page view.
    pub fn close(&mut self) {
        self.carousel = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("price is not a number")]
    NotANumber,
    #[error("price must be greater than zero")]
    NotPositive,
}

/// Validate the new price typed by the admin.
pub fn parse_new_price(input: &str) -> Result<f64, PriceError> {
    let price = parse_leading_float(input).ok_or(PriceError::NotANumber)?;
    if price > 0.0 {
        Ok(price)
    } else {
        Err(PriceError::NotPositive)
    }
}
