pub mod checksum;
pub mod package;
pub mod verify;

use colored::Colorize;
use fwcrc::Verdict;

fn print_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Match { .. } => println!("{}", format!("Verification successful: {verdict}").green()),
        Verdict::Mismatch { .. } => println!("{}", format!("Verification failed: {verdict}").red()),
        Verdict::NoReference => println!("{}", format!("Verification skipped: {verdict}").yellow()),
    }
}
