//! Bounded Levenshtein distance over Unicode scalar values.

/// Matches many candidate terms against one fixed query, keeping the decoded
/// query and the row buffers across calls.
pub struct BoundedLevenshtein {
    query: Vec<char>,
    max: usize,
    prev_row: Vec<usize>,
    curr_row: Vec<usize>,
}

impl BoundedLevenshtein {
    pub fn new(query: &str, max: usize) -> BoundedLevenshtein {
        let query: Vec<char> = query.chars().collect();
        let width = query.len() + 1;
        BoundedLevenshtein {
            query,
            max,
            prev_row: vec![0; width],
            curr_row: vec![0; width],
        }
    }

    /// Returns the distance between the query and `term` if it does not
    /// exceed the bound.
    ///
    /// Gives up as soon as every cell of a row is above the bound, which makes
    /// the check against a large term dictionary cheap.
    pub fn distance(&mut self, term: &str) -> Option<usize> {
        let max = self.max;
        let width = self.query.len();
        if term.chars().count().abs_diff(width) > max {
            return None;
        }

        for (j, cell) in self.prev_row.iter_mut().enumerate() {
            *cell = j;
        }
        for (i, tc) in term.chars().enumerate() {
            self.curr_row[0] = i + 1;
            let mut row_min = self.curr_row[0];
            for (j, &qc) in self.query.iter().enumerate() {
                let cost = usize::from(tc != qc);
                let cell = (self.prev_row[j + 1] + 1)
                    .min(self.curr_row[j] + 1)
                    .min(self.prev_row[j] + cost);
                self.curr_row[j + 1] = cell;
                row_min = row_min.min(cell);
            }
            if row_min > max {
                return None;
            }
            std::mem::swap(&mut self.prev_row, &mut self.curr_row);
        }
        let result = self.prev_row[width];
        (result <= max).then_some(result)
    }
}
