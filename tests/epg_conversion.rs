use std::io::Write;

use chrono::{Local, TimeZone};
use epg_srbcyr::config::Config;
use epg_srbcyr::epg::{ChannelRules, RewriteOptions, compose, convert};
use epg_srbcyr::errors::ConversionError;

const CONFIG: &str = r#"
[epg.mts]
url = "guide.xml"
channel-translit = ["RTS 1", "RTS 2"]
channel-map = { "RTS 1 HD" = "rts1" }
dummy = ["Info Kanal"]
invalid-tags = ["icon", "rating"]
"#;

const GUIDE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE tv SYSTEM "xmltv.dtd">
<tv generator-info-name="grabber">
  <channel id="RTS 1 HD">
    <display-name lang="sr">RTS 1 HD</display-name>
    <icon src="http://example.org/rts1.png"/>
  </channel>
  <channel id="Info Kanal"><display-name>Info</display-name></channel>
  <programme start="20240315060000 +0100" stop="20240315090000 +0100" channel="RTS 1 HD">
    <title lang="sr">Jutarnji program</title>
    <desc lang="sr">Vesti, sport i   vremenska prognoza. Gost: DJ Tanjug iz Njujorka.</desc>
    <category lang="sr">Informativni</category>
    <rating system="RRA"><value>12</value></rating>
  </programme>
  <programme start="20240315090000 +0100" stop="20240315100000 +0100" channel="Info Kanal">
    <title>Reklame</title>
  </programme>
  <programme start="20240315100000 +0100" stop="20240315110000 +0100" channel="Pink">
    <title>Zadruga</title>
  </programme>
</tv>
"#;

fn load_rules() -> ChannelRules {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let config = Config::load_from_file(file.path()).unwrap();
    ChannelRules::from_config(config.epg_source("mts").unwrap())
}

fn options() -> RewriteOptions {
    RewriteOptions {
        generated_at: Local.with_ymd_and_hms(2024, 3, 15, 5, 0, 0).unwrap(),
        generation_comment: false,
    }
}

fn convert_str(input: &str, rules: &ChannelRules) -> String {
    let mut output = Vec::new();
    convert(input.as_bytes(), &mut output, rules, &options()).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_full_guide_conversion() {
    let rules = load_rules();
    let output = convert_str(GUIDE, &rules);

    assert!(output.starts_with(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<tv generator-info-name=\"grabber\" date=\"20240315\">"
    ));
    assert!(output.contains(
        "<channel id=\"rts1\"><display-name lang=\"sr\">RTS 1 HD</display-name></channel>\n"
    ));
    assert!(output.contains("<channel id=\"dummy (infokanal)\"><display-name>Info</display-name></channel>\n"));
    assert!(output.contains("<title lang=\"sr\">Јутарњи програм</title>"));
    assert!(output.contains(
        "<desc lang=\"sr\">Вести, спорт и временска прогноза. Гост: DJ Тан\u{200C}југ из Њујорка.</desc>"
    ));
    // category is not a transliterated element
    assert!(output.contains("<category lang=\"sr\">Informativni</category>"));
    assert!(output.contains("channel=\"dummy (infokanal)\"><title>Reklame</title>"));
    assert!(output.contains("channel=\"pink\"><title>Zadruga</title>"));

    assert!(!output.contains("icon"));
    assert!(!output.contains("rating"));
    assert!(!output.contains("DOCTYPE"));
    assert_eq!(output.matches("</programme>\n").count(), 3);
}

#[test]
fn test_conversion_is_stable_on_its_own_output() {
    // dummy rewriting is not idempotent, so only translit and map tables here
    let rules = ChannelRules::new(
        ["RTS 1"],
        [("RTS 1 HD".to_string(), "rts1".to_string())],
        Vec::<String>::new(),
        ["icon", "rating"],
    );
    let once = convert_str(GUIDE, &rules);
    let twice = convert_str(&once, &rules);
    assert_eq!(once, twice);
}

#[test]
fn test_malformed_guide_is_rejected() {
    let rules = load_rules();
    let truncated = &GUIDE[..GUIDE.find("<programme start=\"20240315090000").unwrap()];

    let mut output = Vec::new();
    let err = convert(truncated.as_bytes(), &mut output, &rules, &options()).unwrap_err();
    assert!(matches!(err, ConversionError::MalformedInput { .. }), "{err}");
}

#[test]
fn test_composed_guide_converts_cleanly() {
    let rules = load_rules();
    let channels = "RTS 1 HD|RTS 1\nPink|Pink\n";
    let programmes = "RTS 1 HD|20240315200000 +0100|20240315203000 +0100|Dnevnik|Vesti_dana\n\
                      Pink|20240315200000 +0100|20240315210000 +0100|Zadruga|\n";

    let mut composed = Vec::new();
    let stats = compose(
        channels.as_bytes(),
        programmes.as_bytes(),
        &mut composed,
        &rules,
        &options(),
    )
    .unwrap();
    assert_eq!((stats.channels, stats.programmes), (2, 2));

    let composed = String::from_utf8(composed).unwrap();
    assert!(composed.contains("<title>Дневник</title><desc>Вести-дана</desc>"));
    assert!(composed.contains("<title>Zadruga</title><desc/>"));

    let converted = convert_str(&composed, &rules);
    assert!(converted.contains("<title>Дневник</title><desc>Вести-дана</desc>"));
    assert!(converted.contains("<tv date=\"20240315\">"));
}
