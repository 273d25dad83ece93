//! Prompt construction for LLM requests.
//!
//! Builds the Turkish prompts used by the classifier, the SQL synthesizer
//! and the two answer composers. Each builder injects the live schema
//! descriptor and the user's question into a fixed template.

use crate::db::Schema;
use crate::llm::types::Message;

/// Template for the question router.
const ROUTER_PROMPT_TEMPLATE: &str = r#"Sen bir yönlendirme asistanısın. Kullanıcının sorusunu analiz et.

Veritabanı Tabloları:
{table_info}

Karar Mantığı:
1. Eğer soru, veritabanındaki tablolardan veri çekmeyi gerektiriyorsa (örn: "kaç inek var", "dünkü süt üretimi") -> "SQL" cevabını ver.
2. Eğer soru genel bilgi, sohbet veya veritabanında olmayan bir konuysa -> "GENERAL" cevabını ver.

Sadece "SQL" veya "GENERAL" kelimesini döndür.

Soru: {question}"#;

/// System template for the SQL synthesizer.
const QUERY_WRITER_TEMPLATE: &str = r#"Sen PostgreSQL konusunda uzmanlaşmış, kıdemli bir Veritabanı Mühendisisin.
Görevin: Çiftçinin doğal dilde sorduğu soruları, verilen şemaya uygun, en optimize ve hatasız SQL sorgularına çevirmektir.

--- VERİTABANI ŞEMASI VE KURALLAR ---
{table_info}

--- KRİTİK POSTGRESQL SÖZDİZİMİ KURALLARI (BUNLARA KESİNLİKLE UY) ---
1. **ÇIKTI FORMATI:** Sadece ve sadece saf SQL kodu üret. Markdown, tırnak işareti veya açıklama metni EKLEME.
2. **ZAMAN KAVRAMI:** - "Bugün" = CURRENT_DATE
   - "Dün" = CURRENT_DATE - INTERVAL '1 day'
3. **AGGREGATION:** `FILTER (WHERE ...)` bloğu içinde aggregate fonksiyon (SUM, AVG) kullanma.
4. **METİN ARAMALARI:** İnek isimleri için her zaman `ILIKE` kullan.
5. **SÜT HESABI:** `sut` tablosunda `gunluk_sagim` zaten hesaplanmış bir kolondur. Toplama işlemi yapma.

6. **UNION VE LIMIT KULLANIMI (ÇOK ÖNEMLİ):**
   - Eğer "En yüksek X ve En düşük Y" gibi bir soru gelirse ve `UNION` kullanman gerekirse;
   - Her iki `SELECT` sorgusunu da **MUTLAKA PARANTEZ İÇİNE AL**.
   - PostgreSQL, parantezsiz `UNION` içindeki `ORDER BY` ve `LIMIT` ifadelerinde hata verir.
   - DOĞRU: `(SELECT ... ORDER BY ... LIMIT 5) UNION ALL (SELECT ... ORDER BY ... LIMIT 5)`
   - YANLIŞ: `SELECT ... ORDER BY ... LIMIT 5 UNION SELECT ...`

--- ÖRNEK SENARYOLAR (FEW-SHOT LEARNING) ---

Kullanıcı: "Sarıkız'ın dünkü süt verimi nedir?"
SQL:
SELECT s.gunluk_sagim
FROM sut s
JOIN inekler i ON s.inek_id = i.inek_id
WHERE i.inek_name ILIKE '%Sarıkız%' AND s.sagim_tarihi = CURRENT_DATE - INTERVAL '1 day';

Kullanıcı: "Süt verimi en yüksek ve en düşük 3 ineği getir"
SQL:
(SELECT i.inek_name, SUM(s.gunluk_sagim) as toplam_sut
 FROM sut s JOIN inekler i ON s.inek_id = i.inek_id
 GROUP BY i.inek_id, i.inek_name
 ORDER BY toplam_sut DESC
 LIMIT 3)
UNION ALL
(SELECT i.inek_name, SUM(s.gunluk_sagim) as toplam_sut
 FROM sut s JOIN inekler i ON s.inek_id = i.inek_id
 GROUP BY i.inek_id, i.inek_name
 ORDER BY toplam_sut ASC
 LIMIT 3);

Kullanıcı: "Geçen aya göre süt verimi düşen inekler hangileri?"
SQL:
WITH gecen_ay AS (
    SELECT inek_id, AVG(gunluk_sagim) as ort_verim
    FROM sut
    WHERE sagim_tarihi >= date_trunc('month', CURRENT_DATE - INTERVAL '1 month')
      AND sagim_tarihi < date_trunc('month', CURRENT_DATE)
    GROUP BY inek_id
),
bu_ay AS (
    SELECT inek_id, AVG(gunluk_sagim) as ort_verim
    FROM sut
    WHERE sagim_tarihi >= date_trunc('month', CURRENT_DATE)
    GROUP BY inek_id
)
SELECT i.inek_name, b.ort_verim as bu_ay, g.ort_verim as gecen_ay
FROM bu_ay b
JOIN gecen_ay g ON b.inek_id = g.inek_id
JOIN inekler i ON b.inek_id = i.inek_id
WHERE b.ort_verim < g.ort_verim;"#;

/// Template for explaining a query result to the farmer.
const SQL_ANSWER_TEMPLATE: &str = r#"Sen **Süt Sihirbazı**'sın. Veritabanından gelen şu sonucu doğal dilde anlaşılır bir tonda çiftçiye açıkla.
Soru: {question}
Sonuç: {result}
Samimi ve net ol."#;

/// Template for answering general chat questions.
const GENERAL_ANSWER_TEMPLATE: &str = r#"Sen **Süt Sihirbazı**'sın. Çiftçilere yardım eden neşeli bir yapay zeka asistanısın.
Soru: {question}
Samimi, yardımsever bir dille cevap ver."#;

/// Builds the router messages for classifying a question as SQL or general.
pub fn build_router_messages(schema: &Schema, question: &str) -> Vec<Message> {
    let prompt = ROUTER_PROMPT_TEMPLATE
        .replace("{table_info}", &schema.format_for_llm())
        .replace("{question}", question);

    vec![Message::user(prompt)]
}

/// Builds the messages for translating a question into SQL.
pub fn build_query_messages(schema: &Schema, question: &str) -> Vec<Message> {
    let system = QUERY_WRITER_TEMPLATE.replace("{table_info}", &schema.format_for_llm());

    vec![
        Message::system(system),
        Message::user(format!("Soru: {question}")),
    ]
}

/// Builds the messages for explaining a query result in natural language.
pub fn build_sql_answer_messages(question: &str, result: &str) -> Vec<Message> {
    let prompt = SQL_ANSWER_TEMPLATE
        .replace("{question}", question)
        .replace("{result}", result);

    vec![Message::user(prompt)]
}

/// Builds the messages for answering a general (non-database) question.
pub fn build_general_answer_messages(question: &str) -> Vec<Message> {
    let prompt = GENERAL_ANSWER_TEMPLATE.replace("{question}", question);

    vec![Message::user(prompt)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::farm_schema;
    use crate::llm::types::Role;

    #[test]
    fn test_router_messages_include_schema_and_question() {
        let schema = farm_schema();
        let messages = build_router_messages(&schema, "Kaç inek var?");

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0].content.contains("Table: inekler"));
        assert!(messages[0].content.contains("Soru: Kaç inek var?"));
        assert!(!messages[0].content.contains("{table_info}"));
        assert!(!messages[0].content.contains("{question}"));
    }

    #[test]
    fn test_query_messages_structure() {
        let schema = farm_schema();
        let messages = build_query_messages(&schema, "Sarıkız'ın dünkü süt verimi nedir?");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("Table: sut"));
        assert!(messages[0].content.contains("ILIKE"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Soru: Sarıkız'ın dünkü süt verimi nedir?"
        );
    }

    #[test]
    fn test_sql_answer_messages() {
        let messages =
            build_sql_answer_messages("Sarıkız'ın dünkü süt verimi nedir?", "[(25.5)]");

        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("Sonuç: [(25.5)]"));
        assert!(messages[0].content.contains("Süt Sihirbazı"));
    }

    #[test]
    fn test_sql_answer_messages_empty_result() {
        let messages = build_sql_answer_messages("Dünkü süt üretimi nedir?", "");

        assert!(messages[0].content.contains("Sonuç: \n"));
    }

    #[test]
    fn test_general_answer_messages() {
        let messages = build_general_answer_messages("Merhaba, nasılsın?");

        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("neşeli bir yapay zeka"));
        assert!(messages[0].content.contains("Soru: Merhaba, nasılsın?"));
    }
}
