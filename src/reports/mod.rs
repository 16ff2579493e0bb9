mod tables;

pub use self::tables::{
    guess as print_guess, journal_page as print_journal_page, rounds as print_rounds,
    summary as print_summary,
};
