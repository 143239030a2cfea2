// End-to-end: files on disk in, notice files out.

use std::path::{Path, PathBuf};

use powerbill_io::{load_table, FileSink};
use powerbill_recon::{deliver, prepare, BillingLayout, NoticeSink};

const ROSTER_CSV: &str = "\
Brf Solgården;;;;;
Medlemsförteckning 2023;;;;;
;;;;;
;;;;;
;;;;;
;;;;;
Namn;Kod;;;;E-post
Berg, Anna;1-01-2-12-1;;;;a@x.se
Berg, Anders;1-01-2-12-2;;;;a@x.se
;;;;;
Ek, Erik;1-01-2-13-1;;;;-
Ek, Lisa;1-01-2-13-2;;;;
";

const LEDGER_CSV: &str = "\
Elavräkning;;;;;Elkostnad 2023: 2,34 kr/kWh;;
Lägenhet;;;;Förbrukning;;Betalt;Avräkning
12;;;;1500;;3360,40;150,2
13;;;;800;;1950;-75
";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn run_once(roster: &Path, ledger: &Path, sink: &mut FileSink) {
    sink.reset().unwrap();
    let roster = load_table(roster, None).unwrap();
    let ledger = load_table(ledger, None).unwrap();
    let batch = prepare(&roster, &ledger, &BillingLayout::default()).unwrap();
    deliver(&batch, sink).unwrap();
}

#[test]
fn csv_inputs_to_notice_files() {
    let dir = tempfile::tempdir().unwrap();
    let roster = write(dir.path(), "roster.csv", ROSTER_CSV);
    let ledger = write(dir.path(), "ledger.csv", LEDGER_CSV);
    let email = dir.path().join("email.txt");
    let print = dir.path().join("print.txt");

    let mut sink = FileSink::new(&email, &print);
    run_once(&roster, &ledger, &mut sink);

    let email_text = std::fs::read_to_string(&email).unwrap();
    let print_text = std::fs::read_to_string(&print).unwrap();

    assert_eq!(email_text.matches("To: ").count(), 1);
    assert!(email_text.contains("To: a@x.se"));
    assert!(email_text.contains("additional payment due: 150"));

    assert_eq!(print_text.matches("Hello ").count(), 1);
    assert!(print_text.contains("Hello Erik och Lisa,"));
    assert!(print_text.contains("refund: 75"));

    // Second run over the same files replaces, not appends.
    run_once(&roster, &ledger, &mut sink);
    assert_eq!(std::fs::read_to_string(&email).unwrap(), email_text);
    assert_eq!(std::fs::read_to_string(&print).unwrap(), print_text);
}
