//! Primary place-type tokens accepted by the Places nearby search.
//!
//! A subset of the provider's "Table A" covering the categories a mood or a
//! free-text vibe can plausibly map to. Tokens are lowercase snake case.

/// Accepted `includedPrimaryTypes` tokens, sorted for binary search.
pub const PRIMARY_TYPES: &[&str] = &[
    "acai_shop",
    "american_restaurant",
    "amusement_park",
    "aquarium",
    "art_gallery",
    "bagel_shop",
    "bakery",
    "bar",
    "bar_and_grill",
    "barbecue_restaurant",
    "beach",
    "book_store",
    "bowling_alley",
    "brazilian_restaurant",
    "breakfast_restaurant",
    "brunch_restaurant",
    "buffet_restaurant",
    "cafe",
    "cafeteria",
    "candy_store",
    "casino",
    "cat_cafe",
    "chinese_restaurant",
    "chocolate_shop",
    "coffee_shop",
    "community_center",
    "concert_hall",
    "confectionery",
    "cultural_center",
    "deli",
    "dessert_restaurant",
    "dessert_shop",
    "dog_cafe",
    "dog_park",
    "donut_shop",
    "fast_food_restaurant",
    "fine_dining_restaurant",
    "fitness_center",
    "food_court",
    "french_restaurant",
    "garden",
    "greek_restaurant",
    "gym",
    "hamburger_restaurant",
    "hiking_area",
    "historical_landmark",
    "ice_cream_shop",
    "indian_restaurant",
    "italian_restaurant",
    "japanese_restaurant",
    "juice_shop",
    "karaoke",
    "korean_restaurant",
    "library",
    "live_music_venue",
    "market",
    "mediterranean_restaurant",
    "mexican_restaurant",
    "movie_theater",
    "museum",
    "national_park",
    "night_club",
    "park",
    "performing_arts_theater",
    "pizza_restaurant",
    "playground",
    "pub",
    "ramen_restaurant",
    "restaurant",
    "sandwich_shop",
    "seafood_restaurant",
    "shopping_mall",
    "spa",
    "steak_house",
    "sushi_restaurant",
    "tea_house",
    "thai_restaurant",
    "tourist_attraction",
    "vegan_restaurant",
    "vegetarian_restaurant",
    "vietnamese_restaurant",
    "wine_bar",
    "yoga_studio",
    "zoo",
];

/// Returns `true` if `token` is an accepted primary type.
#[must_use]
pub fn is_primary_type(token: &str) -> bool {
    PRIMARY_TYPES.binary_search(&token).is_ok()
}
