use add_exam_questions::orchestrator::missing_input_path;
use add_exam_questions::{logger, App, Config, PremiumPolicy, QuestionRecord, SittingConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const EXISTING_BANK: &str = r#"[
  {
    "id": 1,
    "year": "2023_04",
    "category": "労働生理",
    "question_text": "既存の問題",
    "options": ["ア", "イ"],
    "correct_index": 0,
    "explanation_summary": "既存",
    "mnemonic": "覚え方",
    "is_hazardous": false,
    "is_premium": false
  },
  {
    "id": 8,
    "year": "2023_10",
    "category": "労働衛生（有害業務）",
    "question_text": "二問目",
    "options": ["ア", "イ", "ウ"],
    "correct_index": 2,
    "explanation_summary": "既存",
    "mnemonic": "",
    "is_hazardous": true,
    "is_premium": false
  }
]"#;

const RAW_2018_04: &str = "--- Page 1 ---\n\
【問1】ある作業について述べたものである。\n（１）正しい\n（２）誤り\n\
▶▶解説◀◀\n（２）が誤り。\n＊解答＊（２）\n\
【問2】解答がない問題（１）甲（２）乙\n\
--- Page 2 ---\n\
【問21】事業者の義務に関する次の記述のうち、正しいものはどれか。\n\
（１）ア\n（２）イ\n（３）ウ\n（４）エ\n（５）オ\n▶▶解説◀◀\n正しいのは（４）。\n＊解答＊（４）\n";

const RAW_2019_10: &str = "【問４４】血液について（１）赤血球（２）白血球＊解答＊（１）";

struct Fixture {
    _dir: TempDir,
    bank: PathBuf,
    raw_2018: PathBuf,
    raw_2019: PathBuf,
}

fn fixture() -> Fixture {
    logger::init();
    let dir = tempdir().unwrap();
    let bank = dir.path().join("questions.json");
    let raw_2018 = dir.path().join("raw_text_2018_04.txt");
    let raw_2019 = dir.path().join("raw_text_2019_10.txt");
    fs::write(&bank, EXISTING_BANK).unwrap();
    fs::write(&raw_2018, RAW_2018_04).unwrap();
    fs::write(&raw_2019, RAW_2019_10).unwrap();
    Fixture {
        _dir: dir,
        bank,
        raw_2018,
        raw_2019,
    }
}

fn config(bank: &Path, sittings: Vec<SittingConfig>) -> Config {
    Config {
        bank_path: bank.to_path_buf(),
        dry_run: false,
        skip_missing_inputs: false,
        premium: PremiumPolicy::Locked,
        sittings,
    }
}

fn read_bank(path: &Path) -> Vec<QuestionRecord> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn migrates_sittings_into_bank() {
    let fx = fixture();
    let cfg = config(
        &fx.bank,
        vec![
            SittingConfig::new(&fx.raw_2018, "2018_04", "平成30年4月"),
            SittingConfig::new(&fx.raw_2019, "2019_2", "令和元年10月").with_normalize_digits(true),
        ],
    );

    let report = App::initialize(cfg).unwrap().run().await.unwrap();
    assert_eq!(report.appended, 3);
    assert_eq!(report.bank_total, 5);
    assert!(report.written);
    assert_eq!(report.skipped_blocks(), 1);

    let parse_2018 = report.sittings[0].parse.as_ref().unwrap();
    assert_eq!(parse_2018.blocks_found, 3);
    assert_eq!(parse_2018.parsed, 2);

    let bank = read_bank(&fx.bank);
    let ids: Vec<u64> = bank.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 8, 9, 10, 11]);
    assert_eq!(bank[0].mnemonic, "覚え方");
    assert!(!bank[0].is_premium);

    let q1 = &bank[2];
    assert_eq!(q1.year, "2018_04");
    assert_eq!(q1.question_text, "ある作業について述べたものである。");
    assert_eq!(q1.options, vec!["正しい", "誤り"]);
    assert_eq!(q1.correct_index, 1);
    assert_eq!(q1.category, "関係法令（有害業務）");
    assert!(q1.is_hazardous);
    assert!(q1.is_premium);
    assert_eq!(q1.explanation_summary, "（２）が誤り。");

    let q21 = &bank[3];
    assert_eq!(q21.options.len(), 5);
    assert_eq!(q21.correct_index, 3);
    assert_eq!(q21.category, "関係法令（有害業務以外）");
    assert!(!q21.is_hazardous);

    let q44 = &bank[4];
    assert_eq!(q44.year, "2019_2");
    assert_eq!(q44.category, "労働生理");
    assert_eq!(
        q44.explanation_summary,
        "令和元年10月公表問題の公式解説を簡略化した要約です。"
    );

    let written = fs::read_to_string(&fx.bank).unwrap();
    assert!(written.contains("\"関係法令（有害業務）\""));
    assert!(written.contains("\n  {\n    \"id\": 9,"));
}

#[tokio::test]
async fn missing_input_aborts_without_touching_bank() {
    let fx = fixture();
    let cfg = config(
        &fx.bank,
        vec![
            SittingConfig::new(&fx.raw_2018, "2018_04", "平成30年4月"),
            SittingConfig::new(fx.raw_2018.with_file_name("raw_text_2019_04.txt"), "2019_1", "平成31年4月"),
        ],
    );

    let err = App::initialize(cfg).unwrap().run().await.unwrap_err();
    let path = missing_input_path(&err).expect("应为输入缺失错误");
    assert!(path.ends_with("raw_text_2019_04.txt"));
    assert_eq!(fs::read_to_string(&fx.bank).unwrap(), EXISTING_BANK);
}

#[tokio::test]
async fn missing_bank_aborts() {
    let fx = fixture();
    let cfg = config(
        &fx.bank.with_file_name("absent.json"),
        vec![SittingConfig::new(&fx.raw_2018, "2018_04", "平成30年4月")],
    );

    let err = App::initialize(cfg).unwrap().run().await.unwrap_err();
    assert!(missing_input_path(&err).is_some());
}

#[tokio::test]
async fn skip_missing_inputs_continues() {
    let fx = fixture();
    let mut cfg = config(
        &fx.bank,
        vec![
            SittingConfig::new(fx.raw_2018.with_file_name("raw_text_2018_10.txt"), "2018_2", "平成30年10月"),
            SittingConfig::new(&fx.raw_2019, "2019_2", "令和元年10月"),
        ],
    );
    cfg.skip_missing_inputs = true;

    let report = App::initialize(cfg).unwrap().run().await.unwrap();
    assert!(report.sittings[0].parse.is_none());
    assert_eq!(report.appended, 1);
    assert_eq!(read_bank(&fx.bank).last().unwrap().id, 9);
}

#[tokio::test]
async fn dry_run_does_not_write() {
    let fx = fixture();
    let mut cfg = config(&fx.bank, vec![SittingConfig::new(&fx.raw_2018, "2018_04", "平成30年4月")]);
    cfg.dry_run = true;

    let report = App::initialize(cfg).unwrap().run().await.unwrap();
    assert!(!report.written);
    assert_eq!(report.appended, 2);
    assert_eq!(fs::read_to_string(&fx.bank).unwrap(), EXISTING_BANK);
}

#[tokio::test]
async fn rerun_appends_duplicates_and_flags_them() {
    let fx = fixture();
    let sittings = vec![SittingConfig::new(&fx.raw_2018, "2018_04", "平成30年4月")];

    App::initialize(config(&fx.bank, sittings.clone())).unwrap().run().await.unwrap();
    let report = App::initialize(config(&fx.bank, sittings)).unwrap().run().await.unwrap();

    assert_eq!(report.sittings[0].merge.possible_duplicates, 2);
    assert_eq!(report.sittings[0].merge.first_id, Some(11));
    assert_eq!(read_bank(&fx.bank).len(), 6);
}

#[tokio::test]
async fn prior_records_are_written_back_verbatim() {
    let fx = fixture();
    let prior = r#"{"year":"2023_04","zeta":1,"alpha":2,"question_text":"q"}"#;
    let sparse = r#"{"id":4,"options":["ア","イ"],"note":null}"#;
    fs::write(&fx.bank, format!("[{},{}]", prior, sparse)).unwrap();

    let cfg = config(&fx.bank, vec![SittingConfig::new(&fx.raw_2019, "2019_2", "令和元年10月")]);
    let report = App::initialize(cfg).unwrap().run().await.unwrap();
    assert_eq!(report.appended, 1);

    let bank: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&fx.bank).unwrap()).unwrap();
    assert_eq!(bank.len(), 3);
    assert_eq!(serde_json::to_string(&bank[0]).unwrap(), prior);
    assert_eq!(serde_json::to_string(&bank[1]).unwrap(), sparse);
    assert_eq!(bank[2]["id"], 5);
    assert_eq!(bank[2]["year"], "2019_2");

    let written = fs::read_to_string(&fx.bank).unwrap();
    assert!(written.starts_with(
        "[\n  {\n    \"year\": \"2023_04\",\n    \"zeta\": 1,\n    \"alpha\": 2,\n    \"question_text\": \"q\"\n  },"
    ));
}
