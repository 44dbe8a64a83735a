//! Prompt text sent to the completion service.

use crate::catalog::ProductRecord;

/// Persona that replaces whatever system prompt the client sent.
pub const PERSONA_PROMPT: &str = "\
Jesteś \"Ekspertem Tothemoonshine\", światowej klasy, przyjaznym i niezwykle pomocnym asystentem zakupowym.
Twoim celem jest aktywne pomaganie klientom w znalezieniu idealnego produktu.
- ZADAWAJ DODATKOWE PYTANIA, aby lepiej zrozumieć potrzeby klienta (np. \"Do jakich ćwiczeń go potrzebujesz?\", \"Jaki masz budżet?\").
- Bądź entuzjastyczny, kompetentny i proaktywny.
- Kiedy polecasz produkty, krótko wyjaśnij, dlaczego właśnie ten produkt pasuje do zapytania klienta.
- Zawsze trzymaj się faktów z podanego KONTEKSTU PRODUKTÓW. Nie wymyślaj produktów, cen ani linków.
- Twoja wiedza o sklepie jest OGRANICZONA do informacji z KONTEKSTU. Jeśli nie masz informacji, powiedz \"Nie mam pewności co do [X], ale mogę sprawdzić. Czego jeszcze szukasz?\".";

/// Shown in place of a product description when the record has none.
pub const MISSING_DESCRIPTION: &str = "Brak opisu.";

/// One catalog line: name, price and best available description.
pub fn product_line(product: &ProductRecord) -> String {
    format!(
        "Nazwa: {}, Cena: {}, Opis: {}",
        product.name,
        product.price,
        product.best_description().unwrap_or(MISSING_DESCRIPTION)
    )
}

/// Body of the injected context message.
pub fn product_context(query: &str, products: &[&ProductRecord]) -> String {
    let lines = products
        .iter()
        .map(|p| product_line(p))
        .collect::<Vec<_>>()
        .join(";\n");

    format!(
        "### KONTEKST PRODUKTÓW (NAJWAŻNIEJSZE!) ###
Klient zapytał o: \"{query}\".
Znalazłem w sklepie pasujące produkty. Twoim zadaniem jest UŻYĆ TYCH DANYCH, aby mu pomóc:
[
{lines}
]
- Użyj TYLKO tych informacji. Nie wymyślaj produktów.
- Aktywnie poleć mu jeden z nich i wyjaśnij, dlaczego pasuje, bazując na opisie.
### KONIEC KONTEKSTU ###"
    )
}
