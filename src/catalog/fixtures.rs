//! Fixture catalog data
//!
//! The storefront ships with a fixed set of curated baskets. Prices are in
//! EUR with two decimal places.

use super::models::Basket;
use rust_decimal::Decimal;

/// Convenience constructor for fixture entries.
fn basket(id: u32, name: &str, category: &str, description: &str, minor_price: i64) -> Basket {
    Basket {
        id,
        name: name.into(),
        category: category.into(),
        description: description.into(),
        image_ref: format!("baskets/{id}.jpg"),
        price: Decimal::new(minor_price, 2),
    }
}

/// Returns the fixture basket set, in display order.
pub fn baskets() -> Vec<Basket> {
    vec![
        basket(
            1,
            "Pareja Gourmet",
            "Parejas",
            "Selección para dos: vino, quesos y dulces artesanos.",
            5000,
        ),
        basket(
            2,
            "Trio Ibérico",
            "Ibéricos",
            "Jamón, lomo y chorizo ibérico de bellota.",
            4500,
        ),
        basket(
            3,
            "Cesta Dulce Celebración",
            "Dulces",
            "Turrones, chocolates y pastas para celebrar.",
            3850,
        ),
        basket(
            4,
            "Selección Quesos Artesanos",
            "Quesos",
            "Cuatro quesos de pequeñas queserías con membrillo.",
            4200,
        ),
        basket(
            5,
            "Gran Reserva Familiar",
            "Familiar",
            "La cesta grande: embutidos, conservas, vino y dulces.",
            7990,
        ),
        basket(
            6,
            "Desayuno Sorpresa",
            "Desayunos",
            "Café de especialidad, mermeladas y bollería.",
            2995,
        ),
        basket(
            7,
            "Vinos de Autor",
            "Vinos",
            "Tres tintos de bodegas pequeñas con maridaje.",
            6500,
        ),
        basket(
            8,
            "Picnic Desconocidos",
            "Desconocidos",
            "Una cesta a ciegas: productos sorpresa de temporada.",
            5500,
        ),
    ]
}
