//! Text rendering of the board as a slanted hex diagram
//!
//! A 3x3 board with X at (1,1):
//!
//! ```text
//! . — . — .
//!  \ / \ / \
//!   . — X — .
//!    \ / \ / \
//!     . — . — .
//! ```

use std::fmt;

use crate::board::Board;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        let mut indent = String::new();

        for (r, row) in self.rows().enumerate() {
            let symbols: Vec<String> = row.iter().map(|cell| cell.symbol().to_string()).collect();
            writeln!(f, "{}{}", indent, symbols.join(" — "))?;

            // Links down to the next row
            if r + 1 < size {
                writeln!(f, "{} \\{}", indent, " / \\".repeat(size - 1))?;
                indent.push_str("  ");
            }
        }
        Ok(())
    }
}
