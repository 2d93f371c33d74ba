use crate::parsers::{ReadableText, extract_readable};

const LISTING: &str = r#"<!DOCTYPE html>
<html lang="de">
<head><title>Wochenmarkt am Rathausplatz</title></head>
<body>
  <header style="background: url('banner.png')">
    <nav><a href="/">Start</a> | <a href="/termine">Termine</a> | <a href="/suche">Suche</a></nav>
  </header>
  <main>
    <article>
      <h1>Wochenmarkt am Rathausplatz</h1>
      <p style='font-weight: bold'>Jeden Donnerstag von 7 bis 13 Uhr bieten rund vierzig Händlerinnen und
      Händler aus der Region frisches Obst, Gemüse, Käse, Brot und Blumen auf dem Rathausplatz an.</p>
      <p>Neben den bekannten Ständen gibt es in diesem Sommer einen eigenen Bereich für junge
      Betriebe, die ihre Produkte zum ersten Mal auf einem Markt verkaufen. Die Stadt unterstützt
      diese Neugründungen mit vergünstigten Standgebühren und einer gemeinsamen Werbeaktion.</p>
      <p>Wer mit dem Fahrrad kommt, findet an der Nordseite des Platzes zusätzliche Abstellbügel.
      Der Markt ist barrierefrei zugänglich, und an der Information am Brunnen gibt es kostenlose
      Einkaufstaschen aus recyceltem Material, solange der Vorrat reicht.</p>
    </article>
  </main>
  <footer><p>Impressum · Datenschutz</p></footer>
</body>
</html>"#;

#[test]
fn test_extracts_article_paragraphs() {
    let readable = extract_readable(LISTING, Some("https://example.com/de/markt")).unwrap();

    assert!(readable.content.contains("Jeden Donnerstag von 7 bis 13 Uhr"));
    assert!(readable.content.contains("Einkaufstaschen aus recyceltem Material"));
    assert!(!readable.content.contains("font-weight"));
    assert!(readable.char_count() > 300);
}

#[test]
fn test_extracted_text_is_normalized() {
    let readable = extract_readable(LISTING, None).unwrap();

    assert!(!readable.content.contains("  "));
    assert!(!readable.content.contains("\n\n\n"));
    assert_eq!(readable.content, readable.content.trim());
}

#[test]
fn test_returns_none_without_article() {
    assert_eq!(extract_readable("<html><body></body></html>", None), None);
    assert_eq!(extract_readable("", None), None);
}

#[test]
fn test_prompt_text_prepends_missing_title() {
    let readable = ReadableText::new(
        Some("Lesung im Hof".to_string()),
        "Beginn 19 Uhr.".to_string(),
    );
    assert_eq!(readable.prompt_text(), "Lesung im Hof\n\nBeginn 19 Uhr.");

    let already_titled = ReadableText::new(
        Some("Lesung".to_string()),
        "Lesung im Hof, Beginn 19 Uhr.".to_string(),
    );
    assert_eq!(already_titled.prompt_text(), "Lesung im Hof, Beginn 19 Uhr.");

    let untitled = ReadableText::new(None, "Beginn 19 Uhr.".to_string());
    assert_eq!(untitled.prompt_text(), "Beginn 19 Uhr.");
}
