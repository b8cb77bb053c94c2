use chrono::{
    Days,
    NaiveDate
};

/// Inclusive range of calendar dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeOfDates {
    start_date: NaiveDate,
    end_date: NaiveDate
}

impl RangeOfDates {
    /// Range of `n_days` consecutive dates beginning at `start_date`.
    ///
    /// Returns `None` for an empty range or when the last day is not representable.
    pub fn from_start(start_date: NaiveDate, n_days: u32) -> Option<RangeOfDates> {
        if n_days == 0 {
            return None;
        }
        let end_date = start_date.checked_add_days(Days::new((n_days - 1) as u64))?;
        Some(RangeOfDates { start_date, end_date })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn len(&self) -> usize {
        ((self.end_date - self.start_date).num_days() + 1) as usize
    }

    pub fn contain(&self, d: NaiveDate) -> bool {
        (d >= self.start_date) && (d <= self.end_date)
    }

    pub fn iter(&self) -> RangeOfDatesIterator<'_> {
        RangeOfDatesIterator {
            range_of_dates: self,
            index: 0,
        }
    }
}

pub struct RangeOfDatesIterator<'a> {
    range_of_dates: &'a RangeOfDates,
    index: usize,
}

impl<'a> Iterator for RangeOfDatesIterator<'a> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.range_of_dates.len() {
            let result = self.range_of_dates
                .start_date()
                .checked_add_days(Days::new(self.index as u64));
            self.index += 1;
            result
        } else {
            None
        }
    }
}
