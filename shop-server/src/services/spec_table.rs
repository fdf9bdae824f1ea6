//! Specification table renderer
//!
//! Renders the characteristics block of a product detail page as an
//! HTML fragment. Row labels and their order are fixed per subtype;
//! the SD capacity row is dropped for phones without an SD slot.

use crate::db::models::{AnyProduct, Notebook, Smartphone};

const TABLE_HEAD: &str = "<table class=\"table\">\n<tbody>\n";
const TABLE_TAIL: &str = "</tbody>\n</table>\n";

fn push_row(out: &mut String, name: &str, value: &str) {
    out.push_str("<tr>\n<td>");
    out.push_str(name);
    out.push_str("</td>\n<td>");
    out.push_str(value);
    out.push_str("</td>\n</tr>\n");
}

/// Render the specification table of any product
pub fn render_spec(product: &AnyProduct) -> String {
    let mut content = String::new();
    match product {
        AnyProduct::Notebook(n) => notebook_rows(&mut content, n),
        AnyProduct::Smartphone(s) => smartphone_rows(&mut content, s),
    }

    let mut out = String::with_capacity(TABLE_HEAD.len() + content.len() + TABLE_TAIL.len());
    out.push_str(TABLE_HEAD);
    out.push_str(&content);
    out.push_str(TABLE_TAIL);
    out
}

fn notebook_rows(out: &mut String, n: &Notebook) {
    push_row(out, "Диагональ", &n.diagonal);
    push_row(out, "Тип дисплея", &n.display_type);
    push_row(out, "Частота процессора", &n.processor_freq);
    push_row(out, "Опаративная память", &n.ram);
    push_row(out, "Видеокарта", &n.video);
    push_row(out, "Время работы аккумулятора", &n.time_without_charge);
}

fn smartphone_rows(out: &mut String, s: &Smartphone) {
    push_row(out, "Диагональ", &s.diagonal);
    push_row(out, "Тип дисплея", &s.display_type);
    push_row(out, "Разрешение экрана", &s.resolution);
    push_row(out, "Объем батереи", &s.accum_volume);
    push_row(out, "Опаративная память", &s.ram);
    push_row(out, "Фронтальная камера (МП)", &s.frontal_cam_mp);
    push_row(out, "Камера (МП)", &s.main_cam_mp);
    push_row(out, "Наличие слота для SD карты", s.sd_display());
    if s.sd {
        if let Some(sd_volume_max) = &s.sd_volume_max {
            push_row(out, "Максимальный объем SD карты", sd_volume_max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use surrealdb::sql::Thing;

    fn sample_notebook() -> Notebook {
        Notebook {
            id: None,
            title: "Ноутбук Acer Swift".to_string(),
            description: None,
            slug: "acer-swift".to_string(),
            image: String::new(),
            price: Decimal::new(49_999, 2),
            category: Thing::from(("category", "notebooks")),
            created_at: 0,
            diagonal: "14\"".to_string(),
            display_type: "IPS".to_string(),
            processor_freq: "3.2 ГГц".to_string(),
            ram: "8 ГБ".to_string(),
            video: "GeForce MX250".to_string(),
            time_without_charge: "10 часов".to_string(),
        }
    }

    fn sample_smartphone(sd: bool) -> Smartphone {
        Smartphone {
            id: None,
            title: "Смартфон Xiaomi".to_string(),
            description: None,
            slug: "xiaomi".to_string(),
            image: String::new(),
            price: Decimal::new(19_999, 2),
            category: Thing::from(("category", "smartphones")),
            created_at: 0,
            diagonal: "6.5\"".to_string(),
            display_type: "AMOLED".to_string(),
            resolution: "2340x1080".to_string(),
            accum_volume: "4500 мАч".to_string(),
            ram: "6 ГБ".to_string(),
            sd,
            sd_volume_max: if sd { Some("512 ГБ".to_string()) } else { None },
            main_cam_mp: "48".to_string(),
            frontal_cam_mp: "16".to_string(),
        }
    }

    #[test]
    fn notebook_table_has_six_rows_in_order() {
        let html = render_spec(&AnyProduct::Notebook(sample_notebook()));
        assert_eq!(html.matches("<tr>").count(), 6);
        let diagonal = html.find("Диагональ").unwrap();
        let freq = html.find("Частота процессора").unwrap();
        let charge = html.find("Время работы аккумулятора").unwrap();
        assert!(diagonal < freq && freq < charge);
        assert!(html.starts_with("<table class=\"table\">"));
        assert!(html.ends_with("</table>\n"));
    }

    #[test]
    fn smartphone_with_sd_shows_capacity_row() {
        let html = render_spec(&AnyProduct::Smartphone(sample_smartphone(true)));
        assert_eq!(html.matches("<tr>").count(), 9);
        assert!(html.contains("<td>Да</td>"));
        assert!(html.contains("Максимальный объем SD карты"));
        assert!(html.contains("512 ГБ"));
    }

    #[test]
    fn smartphone_without_sd_skips_capacity_row() {
        let html = render_spec(&AnyProduct::Smartphone(sample_smartphone(false)));
        assert_eq!(html.matches("<tr>").count(), 8);
        assert!(html.contains("<td>Нет</td>"));
        assert!(!html.contains("Максимальный объем SD карты"));
    }
}
