use rb_dictionary::dictionary;
use std::env;
use std::fs;

#[test]
fn int_test_load_sample_word_list() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/words.txt");
    let words = dictionary::load(path).unwrap();

    assert_eq!(words.len(), 30);
    assert!(words.contains("house"));
    assert!(!words.contains("houses"));
    assert_eq!(words.min().map(String::as_str), Some("ant"));
    assert_eq!(words.max().map(String::as_str), Some("zebra"));
    assert_eq!(words.validate(), Ok(()));
}

#[test]
fn int_test_load_file_in_order() {
    let path = env::temp_dir().join(format!("rb-dictionary-{}.txt", std::process::id()));
    fs::write(&path, "house\ndog\nant\nzebra\n").unwrap();

    let words = dictionary::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        words.iter().map(String::as_str).collect::<Vec<&str>>(),
        vec!["ant", "dog", "house", "zebra"],
    );
    assert_eq!(words.render().lines().count(), 4);
}
