#![forbid(unsafe_code)]

use super::{SeedSummary, SqliteStore, StoreError};
use rusqlite::{Transaction, params};
use tracing::info;

struct QuestionSeed {
    id: &'static str,
    text: &'static str,
    category: &'static str,
    tags: &'static str,
}

struct ProfileSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    tags: &'static str,
    rarity: &'static str,
}

struct AchievementSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    condition_type: &'static str,
    condition_value: i64,
    xp_reward: i64,
    rarity: &'static str,
}

struct MealSeed {
    id: &'static str,
    course: &'static str,
    name: &'static str,
    description: &'static str,
    tags: &'static str,
    cuisine: &'static str,
    prep_time_min: i64,
    cook_time_min: i64,
    difficulty: i64,
    budget: &'static str,
    calories: i64,
    servings: i64,
    wine_pairing: Option<&'static str>,
    cheese_pairing: Option<&'static str>,
    season: &'static str,
    is_vegetarian: bool,
    is_vegan: bool,
    is_gluten_free: bool,
    ingredients: &'static [&'static str],
}

const QUESTIONS: &[QuestionSeed] = &[
    QuestionSeed { id: "spicy_curry", text: "A fiery Thai red curry lands on the table. Dig in?", category: "taste", tags: "spicy,thai,asian,exotic" },
    QuestionSeed { id: "cheese_board", text: "Would you end dinner with a loaded cheese board?", category: "taste", tags: "cheese,french,classic,creamy" },
    QuestionSeed { id: "raw_salmon", text: "Fresh salmon sashimi for lunch?", category: "taste", tags: "fish,salmon,japanese,fresh,healthy" },
    QuestionSeed { id: "chocolate_fondant", text: "Molten chocolate fondant, still warm from the oven?", category: "taste", tags: "sweet,chocolate,dessert,pastry" },
    QuestionSeed { id: "rare_steak", text: "A thick ribeye, seared rare?", category: "taste", tags: "meat,steak,grill,protein" },
    QuestionSeed { id: "street_tacos", text: "Tacos al pastor from a street cart at midnight?", category: "lifestyle", tags: "street,tacos,mexican,casual,spicy" },
    QuestionSeed { id: "green_smoothie", text: "Kale and avocado smoothie to start the day?", category: "lifestyle", tags: "healthy,avocado,fresh,light" },
    QuestionSeed { id: "ramen_bowl", text: "A steaming bowl of tonkotsu ramen?", category: "cuisine", tags: "japanese,asian,umami,comfort" },
    QuestionSeed { id: "wine_pairing", text: "Do you pick the wine before the dish?", category: "lifestyle", tags: "wine_red,wine_white,pairing,refined" },
    QuestionSeed { id: "greek_salad", text: "Tomatoes, olives and feta under olive oil?", category: "cuisine", tags: "greek,tomato,olive,fresh,herbs" },
    QuestionSeed { id: "fresh_croissant", text: "A butter croissant straight from the bakery?", category: "taste", tags: "pastry,french,baking,sweet" },
    QuestionSeed { id: "tofu_stirfry", text: "Crispy tofu and vegetable stir-fry instead of meat?", category: "lifestyle", tags: "vegan,tofu,plant,vegetables,healthy" },
    QuestionSeed { id: "bbq_ribs", text: "Slow-smoked ribs off the barbecue?", category: "taste", tags: "bbq,grill,smoky,meat" },
    QuestionSeed { id: "sunday_brunch", text: "Pancakes and eggs Benedict on a slow Sunday?", category: "lifestyle", tags: "brunch,eggs,pancakes,morning" },
    QuestionSeed { id: "oysters", text: "A dozen oysters with a squeeze of lemon?", category: "taste", tags: "seafood,fresh,iodine,refined" },
    QuestionSeed { id: "truffle_pasta", text: "Fresh tagliatelle with shaved truffle?", category: "cuisine", tags: "italian,creamy,elaborate,refined" },
    QuestionSeed { id: "kimchi", text: "Fermented kimchi on the side of every meal?", category: "taste", tags: "korean,spicy,asian,exotic" },
    QuestionSeed { id: "farmers_market", text: "Do you plan meals around the farmers' market?", category: "lifestyle", tags: "seasonal,local,market,organic,fresh" },
    QuestionSeed { id: "fifteen_minute", text: "Is a great weeknight dinner one that takes 15 minutes?", category: "lifestyle", tags: "quick,easy,simple,practical" },
    QuestionSeed { id: "grandma_stew", text: "A family stew recipe handed down for generations?", category: "cuisine", tags: "traditional,family,homemade,classic,french" },
];

const PROFILES: &[ProfileSeed] = &[
    ProfileSeed { id: "epicurien", name: "The Bold Epicurean", description: "Intense flavors and world cuisines are your playground. Spice, heat and discovery first.", tags: "spicy,indian,thai,mexican,korean,adventurous,exotic", rarity: "common" },
    ProfileSeed { id: "gourmet", name: "The Classic Gourmet", description: "Refined, time-proven flavors. Cheese, wine and cream sauces are your comfort zone.", tags: "cheese,wine_red,sauce,creamy,french,classic", rarity: "common" },
    ProfileSeed { id: "healthy", name: "The Healthy Foodie", description: "Freshness and balance without giving up on taste. Vegetables, fish and light flavors.", tags: "healthy,avocado,salmon,herbs,lemon,fruit,fresh,light", rarity: "common" },
    ProfileSeed { id: "comfort", name: "The Comfort Food Lover", description: "Generous, warming dishes. Melted cheese, pasta and sweet treats make your day.", tags: "cheese,italian,comfort,creamy,pastry,cozy", rarity: "common" },
    ProfileSeed { id: "asian_lover", name: "The Asian Soul", description: "Umami, ginger, soy. From Japan to Thailand, chopsticks hold no secrets for you.", tags: "asian,japanese,thai,korean,chinese,vietnamese,umami", rarity: "uncommon" },
    ProfileSeed { id: "mediterranean", name: "The Mediterranean", description: "Olive oil, sun-ripened tomatoes and fresh herbs set the rhythm of your table.", tags: "italian,greek,spanish,tomato,olive,herbs,fresh", rarity: "common" },
    ProfileSeed { id: "carnivore", name: "The Devoted Carnivore", description: "A meal without meat is not a meal. You know every cut and every doneness by heart.", tags: "meat,steak,bbq,grill,smoky,protein", rarity: "common" },
    ProfileSeed { id: "pescetarian", name: "The Pescetarian", description: "Treasures of the sea. Fish, shellfish and crustaceans, always impeccably fresh.", tags: "fish,seafood,salmon,shrimp,fresh,iodine", rarity: "uncommon" },
    ProfileSeed { id: "sweet_tooth", name: "The Sweet Tooth", description: "Desserts, pastries, chocolate. Life is too short to skip the sweet ending.", tags: "sweet,chocolate,pastry,dessert,fruit,sugar", rarity: "common" },
    ProfileSeed { id: "street_food", name: "The Street Foodie", description: "Tacos, kebabs, banh mi. The world's street corners are your dining room.", tags: "street,tacos,burger,kebab,casual,fast", rarity: "uncommon" },
    ProfileSeed { id: "chef_patissier", name: "The Pastry Chef", description: "Croissants, macarons, entremets. You master the delicate art of fine pastry.", tags: "pastry,french,baking,sweet,delicate,technical", rarity: "rare" },
    ProfileSeed { id: "vegan_warrior", name: "The Committed Vegan", description: "Fully plant-based, and proving every day that vegan cooking can be spectacular.", tags: "vegan,plant,tofu,vegetables,healthy,ethical", rarity: "uncommon" },
    ProfileSeed { id: "bbq_master", name: "The BBQ Master", description: "Summer or winter, the grill is your kingdom. Marinades, smoke and fire.", tags: "bbq,grill,smoky,meat,outdoor,summer", rarity: "uncommon" },
    ProfileSeed { id: "brunch_addict", name: "The Brunch Addict", description: "Pancakes, eggs Benedict, avocado toast. Sunday brunch is the week's highlight.", tags: "brunch,eggs,pancakes,avocado,morning,relaxed", rarity: "common" },
    ProfileSeed { id: "wine_expert", name: "The Wine Expert", description: "No dish is chosen without its perfect pairing. Grapes and terroirs are your map.", tags: "wine_red,wine_white,wine_rose,pairing,french,refined", rarity: "rare" },
    ProfileSeed { id: "cheese_lover", name: "The Cheese Devotee", description: "From Epoisses to Comte, a meal without a cheese course feels unfinished.", tags: "cheese,french,traditional,creamy,strong", rarity: "uncommon" },
    ProfileSeed { id: "home_chef", name: "The Home Chef", description: "Hours in the kitchen building elaborate dishes. Cooking is your craft and passion.", tags: "homemade,elaborate,technique,passion,creative", rarity: "uncommon" },
    ProfileSeed { id: "quick_cook", name: "The Speed Chef", description: "Proof that a great dinner can take fifteen minutes. Efficiency with flavor.", tags: "quick,easy,simple,practical,weeknight", rarity: "common" },
    ProfileSeed { id: "world_explorer", name: "The Culinary Explorer", description: "Dishes from five continents and counting. Every cuisine is an expedition.", tags: "world,exotic,diverse,adventurous,cultural", rarity: "rare" },
    ProfileSeed { id: "seasonal", name: "The Locavore", description: "You cook with the seasons and shop local. Markets are your hunting ground.", tags: "seasonal,local,fresh,market,organic,sustainable", rarity: "uncommon" },
    ProfileSeed { id: "fusion", name: "The Fusion Master", description: "Kimchi tacos? Miso risotto? Creativity knows no borders at your table.", tags: "fusion,creative,modern,innovative,mixed", rarity: "rare" },
    ProfileSeed { id: "instagrammer", name: "The Food Instagrammer", description: "A dish is only as good as it looks. Presentation gets as much care as taste.", tags: "aesthetic,presentation,social,trendy,visual", rarity: "uncommon" },
    ProfileSeed { id: "grandma", name: "The Family Heir", description: "Family recipes kept alive with love. Pot-au-feu and apple tart are eternal.", tags: "traditional,family,homemade,classic,french,nostalgic", rarity: "common" },
    ProfileSeed { id: "spice_king", name: "The Spice King", description: "Cumin, coriander, turmeric, chili. You know every spice and how to marry them.", tags: "spicy,herbs,aromatic,indian,moroccan,complex", rarity: "rare" },
];

const ACHIEVEMENTS: &[AchievementSeed] = &[
    AchievementSeed { id: "first_meal", name: "First Dish", description: "Cook your first recipe", category: "cooking", condition_type: "meals_cooked", condition_value: 1, xp_reward: 50, rarity: "common" },
    AchievementSeed { id: "cook_10", name: "Apprentice Cook", description: "Cook 10 recipes", category: "cooking", condition_type: "meals_cooked", condition_value: 10, xp_reward: 100, rarity: "common" },
    AchievementSeed { id: "cook_50", name: "Amateur Chef", description: "Cook 50 recipes", category: "cooking", condition_type: "meals_cooked", condition_value: 50, xp_reward: 250, rarity: "uncommon" },
    AchievementSeed { id: "cook_100", name: "Seasoned Chef", description: "Cook 100 recipes", category: "cooking", condition_type: "meals_cooked", condition_value: 100, xp_reward: 500, rarity: "rare" },
    AchievementSeed { id: "cook_500", name: "Starred Chef", description: "Cook 500 recipes", category: "cooking", condition_type: "meals_cooked", condition_value: 500, xp_reward: 1000, rarity: "epic" },
    AchievementSeed { id: "bocuse", name: "Paul Bocuse", description: "Cook 1000 recipes", category: "cooking", condition_type: "meals_cooked", condition_value: 1000, xp_reward: 2500, rarity: "legendary" },
    AchievementSeed { id: "streak_3", name: "Regular", description: "3-day streak", category: "streak", condition_type: "streak", condition_value: 3, xp_reward: 50, rarity: "common" },
    AchievementSeed { id: "streak_7", name: "Perfect Week", description: "7-day streak", category: "streak", condition_type: "streak", condition_value: 7, xp_reward: 150, rarity: "uncommon" },
    AchievementSeed { id: "streak_30", name: "Month of Fire", description: "30-day streak", category: "streak", condition_type: "streak", condition_value: 30, xp_reward: 500, rarity: "rare" },
    AchievementSeed { id: "streak_100", name: "Centurion", description: "100-day streak", category: "streak", condition_type: "streak", condition_value: 100, xp_reward: 1500, rarity: "epic" },
    AchievementSeed { id: "streak_365", name: "Culinary Year", description: "365-day streak", category: "streak", condition_type: "streak", condition_value: 365, xp_reward: 5000, rarity: "legendary" },
    AchievementSeed { id: "followers_10", name: "Rising Voice", description: "Reach 10 followers", category: "social", condition_type: "followers", condition_value: 10, xp_reward: 50, rarity: "common" },
    AchievementSeed { id: "followers_100", name: "Micro-Influencer", description: "Reach 100 followers", category: "social", condition_type: "followers", condition_value: 100, xp_reward: 200, rarity: "uncommon" },
    AchievementSeed { id: "followers_1000", name: "Food Influencer", description: "Reach 1000 followers", category: "social", condition_type: "followers", condition_value: 1000, xp_reward: 750, rarity: "rare" },
    AchievementSeed { id: "followers_10000", name: "Food Star", description: "Reach 10000 followers", category: "social", condition_type: "followers", condition_value: 10000, xp_reward: 2000, rarity: "epic" },
    AchievementSeed { id: "viral_post", name: "Viral", description: "A post with 100+ likes", category: "social", condition_type: "post_likes", condition_value: 100, xp_reward: 300, rarity: "rare" },
    AchievementSeed { id: "first_post", name: "First Post", description: "Publish your first recipe", category: "social", condition_type: "posts", condition_value: 1, xp_reward: 25, rarity: "common" },
    AchievementSeed { id: "globe_trotter", name: "Globe-Trotter", description: "Cook 10 different cuisines", category: "exploration", condition_type: "cuisines", condition_value: 10, xp_reward: 300, rarity: "uncommon" },
    AchievementSeed { id: "world_chef", name: "World Chef", description: "Cook 20 different cuisines", category: "exploration", condition_type: "cuisines", condition_value: 20, xp_reward: 750, rarity: "rare" },
    AchievementSeed { id: "sommelier", name: "Sommelier", description: "50 wine pairings", category: "exploration", condition_type: "wine_pairings", condition_value: 50, xp_reward: 400, rarity: "uncommon" },
    AchievementSeed { id: "cheese_master", name: "Master Cheesemonger", description: "30 cheese boards", category: "exploration", condition_type: "cheese_plates", condition_value: 30, xp_reward: 300, rarity: "uncommon" },
    AchievementSeed { id: "veggie_week", name: "Veggie Week", description: "7 vegetarian days", category: "special", condition_type: "veggie_streak", condition_value: 7, xp_reward: 200, rarity: "uncommon" },
    AchievementSeed { id: "budget_master", name: "Budget Master", description: "10 budget meals", category: "special", condition_type: "budget_meals", condition_value: 10, xp_reward: 150, rarity: "common" },
    AchievementSeed { id: "quick_chef", name: "Speed Chef", description: "20 recipes under 20 minutes", category: "special", condition_type: "quick_meals", condition_value: 20, xp_reward: 200, rarity: "uncommon" },
    AchievementSeed { id: "club_creator", name: "Culinary Leader", description: "Create a club", category: "social", condition_type: "clubs_created", condition_value: 1, xp_reward: 100, rarity: "common" },
    AchievementSeed { id: "club_popular", name: "Popular Club", description: "A club with 50 members", category: "social", condition_type: "club_members", condition_value: 50, xp_reward: 500, rarity: "rare" },
];

const MEALS: &[MealSeed] = &[
    // Starters
    MealSeed { id: "onion_soup", course: "starter", name: "French Onion Soup", description: "Slow-caramelized onions under a gratineed crouton", tags: "french,classic,comfort,cheese", cuisine: "french", prep_time_min: 15, cook_time_min: 45, difficulty: 2, budget: "low", calories: 320, servings: 4, wine_pairing: Some("Dry white Burgundy"), cheese_pairing: None, season: "winter", is_vegetarian: true, is_vegan: false, is_gluten_free: false, ingredients: &["onion", "beef stock", "baguette", "gruyere", "butter"] },
    MealSeed { id: "tomato_burrata", course: "starter", name: "Heirloom Tomato and Burrata", description: "Ripe tomatoes, creamy burrata, basil and olive oil", tags: "italian,fresh,tomato,creamy", cuisine: "italian", prep_time_min: 10, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 280, servings: 2, wine_pairing: Some("Prosecco"), cheese_pairing: None, season: "summer", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &["tomato", "burrata", "basil", "olive oil"] },
    MealSeed { id: "gazpacho", course: "starter", name: "Andalusian Gazpacho", description: "Chilled raw tomato and pepper soup", tags: "spanish,fresh,tomato,light,summer", cuisine: "spanish", prep_time_min: 15, cook_time_min: 0, difficulty: 1, budget: "low", calories: 150, servings: 4, wine_pairing: Some("Fino sherry"), cheese_pairing: None, season: "summer", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["tomato", "cucumber", "red pepper", "garlic", "olive oil"] },
    MealSeed { id: "beet_carpaccio", course: "starter", name: "Beet Carpaccio", description: "Thin-sliced roasted beets, walnuts and chives", tags: "fresh,light,healthy,seasonal", cuisine: "french", prep_time_min: 20, cook_time_min: 40, difficulty: 2, budget: "low", calories: 180, servings: 2, wine_pairing: None, cheese_pairing: Some("Fresh goat cheese"), season: "autumn", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["beetroot", "walnut", "chive", "olive oil"] },
    MealSeed { id: "shrimp_ceviche", course: "starter", name: "Shrimp Ceviche", description: "Lime-cured shrimp with red onion and cilantro", tags: "seafood,fresh,exotic,light", cuisine: "peruvian", prep_time_min: 25, cook_time_min: 0, difficulty: 2, budget: "medium", calories: 210, servings: 2, wine_pairing: Some("Albarino"), cheese_pairing: None, season: "summer", is_vegetarian: false, is_vegan: false, is_gluten_free: true, ingredients: &["shrimp", "lime", "red onion", "cilantro", "chili"] },
    MealSeed { id: "spring_rolls", course: "starter", name: "Fresh Spring Rolls", description: "Rice paper rolls with vermicelli, herbs and peanut sauce", tags: "vietnamese,asian,fresh,light", cuisine: "vietnamese", prep_time_min: 30, cook_time_min: 0, difficulty: 2, budget: "low", calories: 190, servings: 4, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["rice paper", "rice vermicelli", "carrot", "mint", "peanut"] },
    MealSeed { id: "hummus_plate", course: "starter", name: "Hummus with Flatbread", description: "Silky chickpea hummus, paprika oil, warm flatbread", tags: "lebanese,plant,casual,healthy", cuisine: "lebanese", prep_time_min: 15, cook_time_min: 0, difficulty: 1, budget: "low", calories: 310, servings: 4, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: false, ingredients: &["chickpea", "tahini", "lemon", "garlic", "flatbread"] },
    MealSeed { id: "miso_soup", course: "starter", name: "Miso Soup", description: "Dashi, miso paste, silken tofu and wakame", tags: "japanese,asian,umami,light", cuisine: "japanese", prep_time_min: 5, cook_time_min: 10, difficulty: 1, budget: "low", calories: 90, servings: 2, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["miso", "tofu", "wakame", "scallion"] },
    MealSeed { id: "oeuf_mayo", course: "starter", name: "Oeuf Mayonnaise", description: "Bistro classic, soft-boiled eggs under house mayonnaise", tags: "french,bistro,classic,eggs", cuisine: "french", prep_time_min: 10, cook_time_min: 8, difficulty: 1, budget: "low", calories: 260, servings: 2, wine_pairing: Some("Chablis"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &["egg", "mayonnaise", "chive", "lettuce"] },
    MealSeed { id: "arancini", course: "starter", name: "Sicilian Arancini", description: "Crisp fried risotto balls with a mozzarella heart", tags: "italian,comfort,cheese,fried", cuisine: "italian", prep_time_min: 40, cook_time_min: 20, difficulty: 3, budget: "medium", calories: 380, servings: 4, wine_pairing: Some("Nero d'Avola"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: false, ingredients: &["arborio rice", "mozzarella", "breadcrumbs", "egg", "tomato sauce"] },
    // Mains
    MealSeed { id: "boeuf_bourguignon", course: "main", name: "Boeuf Bourguignon", description: "Beef braised in red wine with pearl onions and mushrooms", tags: "french,classic,meat,comfort,elaborate", cuisine: "french", prep_time_min: 30, cook_time_min: 180, difficulty: 3, budget: "medium", calories: 650, servings: 6, wine_pairing: Some("Pinot Noir"), cheese_pairing: None, season: "winter", is_vegetarian: false, is_vegan: false, is_gluten_free: true, ingredients: &["beef chuck", "red wine", "pearl onion", "mushroom", "carrot", "bacon"] },
    MealSeed { id: "pad_thai", course: "main", name: "Shrimp Pad Thai", description: "Rice noodles, tamarind, peanuts and shrimp", tags: "thai,asian,street,exotic", cuisine: "thai", prep_time_min: 20, cook_time_min: 15, difficulty: 2, budget: "medium", calories: 560, servings: 2, wine_pairing: Some("Off-dry Riesling"), cheese_pairing: None, season: "all", is_vegetarian: false, is_vegan: false, is_gluten_free: true, ingredients: &["rice noodles", "shrimp", "tamarind", "peanut", "egg", "bean sprouts"] },
    MealSeed { id: "margherita", course: "main", name: "Pizza Margherita", description: "Neapolitan classic, tomato, mozzarella, basil", tags: "italian,comfort,cheese,casual", cuisine: "italian", prep_time_min: 120, cook_time_min: 10, difficulty: 2, budget: "low", calories: 720, servings: 2, wine_pairing: Some("Chianti"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: false, ingredients: &["pizza dough", "tomato", "mozzarella", "basil", "olive oil"] },
    MealSeed { id: "salmon_teriyaki", course: "main", name: "Salmon Teriyaki", description: "Glazed salmon fillet with sesame rice", tags: "japanese,asian,fish,salmon,umami", cuisine: "japanese", prep_time_min: 10, cook_time_min: 15, difficulty: 2, budget: "high", calories: 540, servings: 2, wine_pairing: Some("Pinot Gris"), cheese_pairing: None, season: "all", is_vegetarian: false, is_vegan: false, is_gluten_free: false, ingredients: &["salmon", "soy sauce", "mirin", "rice", "sesame"] },
    MealSeed { id: "chickpea_curry", course: "main", name: "Chickpea Coconut Curry", description: "Chickpeas simmered in spiced coconut milk", tags: "indian,spicy,vegan,plant,exotic", cuisine: "indian", prep_time_min: 15, cook_time_min: 30, difficulty: 1, budget: "low", calories: 480, servings: 4, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["chickpea", "coconut milk", "tomato", "onion", "curry powder", "rice"] },
    MealSeed { id: "ratatouille", course: "main", name: "Ratatouille", description: "Provencal stew of eggplant, zucchini and peppers", tags: "french,vegetables,seasonal,healthy", cuisine: "french", prep_time_min: 25, cook_time_min: 60, difficulty: 2, budget: "low", calories: 290, servings: 4, wine_pairing: Some("Provence rose"), cheese_pairing: None, season: "summer", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["eggplant", "zucchini", "red pepper", "tomato", "onion", "herbs de provence"] },
    MealSeed { id: "smash_burger", course: "main", name: "Double Smash Burger", description: "Crisp-edged patties, cheddar, pickles, soft bun", tags: "street,burger,casual,meat", cuisine: "american", prep_time_min: 15, cook_time_min: 10, difficulty: 1, budget: "low", calories: 850, servings: 1, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: false, is_vegan: false, is_gluten_free: false, ingredients: &["ground beef", "cheddar", "burger bun", "pickle", "onion"] },
    MealSeed { id: "bibimbap", course: "main", name: "Bibimbap", description: "Rice bowl with seasoned vegetables, egg and gochujang", tags: "korean,asian,spicy,healthy", cuisine: "korean", prep_time_min: 30, cook_time_min: 20, difficulty: 2, budget: "medium", calories: 590, servings: 2, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &["rice", "spinach", "carrot", "egg", "gochujang", "sesame oil"] },
    MealSeed { id: "paella", course: "main", name: "Seafood Paella", description: "Saffron rice with mussels, shrimp and squid", tags: "spanish,seafood,elaborate,festive", cuisine: "spanish", prep_time_min: 30, cook_time_min: 40, difficulty: 3, budget: "high", calories: 680, servings: 6, wine_pairing: Some("White Rioja"), cheese_pairing: None, season: "summer", is_vegetarian: false, is_vegan: false, is_gluten_free: true, ingredients: &["bomba rice", "mussel", "shrimp", "squid", "saffron", "red pepper"] },
    MealSeed { id: "mushroom_risotto", course: "main", name: "Wild Mushroom Risotto", description: "Carnaroli rice, porcini and parmesan", tags: "italian,creamy,comfort,elaborate", cuisine: "italian", prep_time_min: 15, cook_time_min: 35, difficulty: 3, budget: "medium", calories: 560, servings: 4, wine_pairing: Some("Barbera"), cheese_pairing: Some("Parmigiano Reggiano"), season: "autumn", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &["carnaroli rice", "porcini", "parmesan", "white wine", "shallot", "butter"] },
    MealSeed { id: "tofu_stirfry_main", course: "main", name: "Crispy Tofu Stir-Fry", description: "Golden tofu, broccoli and cashews in ginger sauce", tags: "asian,vegan,tofu,quick,healthy", cuisine: "chinese", prep_time_min: 15, cook_time_min: 12, difficulty: 1, budget: "low", calories: 430, servings: 2, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["tofu", "broccoli", "cashew", "ginger", "soy sauce", "rice"] },
    MealSeed { id: "lamb_tagine", course: "main", name: "Lamb and Apricot Tagine", description: "Slow-cooked lamb with apricots, almonds and ras el hanout", tags: "moroccan,spicy,exotic,elaborate", cuisine: "moroccan", prep_time_min: 25, cook_time_min: 120, difficulty: 3, budget: "high", calories: 620, servings: 4, wine_pairing: Some("Syrah"), cheese_pairing: None, season: "winter", is_vegetarian: false, is_vegan: false, is_gluten_free: true, ingredients: &["lamb shoulder", "apricot", "almond", "ras el hanout", "onion", "couscous"] },
    // Desserts
    MealSeed { id: "creme_brulee", course: "dessert", name: "Creme Brulee", description: "Vanilla custard under a caramelized sugar crust", tags: "french,classic,sweet,creamy", cuisine: "french", prep_time_min: 20, cook_time_min: 40, difficulty: 2, budget: "medium", calories: 420, servings: 4, wine_pairing: Some("Sauternes"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &["cream", "egg yolk", "vanilla", "sugar"] },
    MealSeed { id: "tarte_tatin", course: "dessert", name: "Tarte Tatin", description: "Upside-down caramelized apple tart", tags: "french,classic,sweet,pastry,nostalgic", cuisine: "french", prep_time_min: 30, cook_time_min: 45, difficulty: 3, budget: "low", calories: 460, servings: 6, wine_pairing: Some("Demi-sec Vouvray"), cheese_pairing: None, season: "autumn", is_vegetarian: true, is_vegan: false, is_gluten_free: false, ingredients: &["apple", "puff pastry", "butter", "sugar"] },
    MealSeed { id: "chocolate_fondant_d", course: "dessert", name: "Chocolate Fondant", description: "Molten-centered dark chocolate cake", tags: "sweet,chocolate,comfort,indulgent", cuisine: "french", prep_time_min: 15, cook_time_min: 12, difficulty: 2, budget: "low", calories: 510, servings: 4, wine_pairing: Some("Banyuls"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: false, ingredients: &["dark chocolate", "butter", "egg", "sugar", "flour"] },
    MealSeed { id: "mango_sticky_rice", course: "dessert", name: "Mango Sticky Rice", description: "Coconut sticky rice with ripe mango", tags: "thai,asian,sweet,fruit,exotic", cuisine: "thai", prep_time_min: 15, cook_time_min: 25, difficulty: 1, budget: "medium", calories: 390, servings: 2, wine_pairing: None, cheese_pairing: None, season: "summer", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["sticky rice", "coconut milk", "mango", "sugar"] },
    MealSeed { id: "tiramisu", course: "dessert", name: "Tiramisu", description: "Espresso-soaked ladyfingers and mascarpone cream", tags: "italian,sweet,creamy,classic", cuisine: "italian", prep_time_min: 30, cook_time_min: 0, difficulty: 2, budget: "medium", calories: 480, servings: 6, wine_pairing: Some("Vin Santo"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: false, ingredients: &["mascarpone", "ladyfinger", "espresso", "egg", "cocoa"] },
    MealSeed { id: "fruit_salad", course: "dessert", name: "Citrus Fruit Salad", description: "Seasonal fruit with mint and lime syrup", tags: "fresh,fruit,light,healthy", cuisine: "french", prep_time_min: 15, cook_time_min: 0, difficulty: 1, budget: "low", calories: 160, servings: 4, wine_pairing: None, cheese_pairing: None, season: "summer", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["orange", "strawberry", "kiwi", "mint", "lime"] },
    MealSeed { id: "poached_pear", course: "dessert", name: "Spiced Poached Pears", description: "Pears poached in red wine with cinnamon and star anise", tags: "french,fruit,seasonal,elegant", cuisine: "french", prep_time_min: 10, cook_time_min: 30, difficulty: 1, budget: "low", calories: 240, servings: 4, wine_pairing: None, cheese_pairing: None, season: "winter", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &["pear", "red wine", "cinnamon", "star anise", "sugar"] },
    MealSeed { id: "matcha_cheesecake", course: "dessert", name: "Matcha Cheesecake", description: "Baked cheesecake with a bitter-green matcha swirl", tags: "fusion,japanese,sweet,creamy,modern", cuisine: "japanese", prep_time_min: 30, cook_time_min: 60, difficulty: 3, budget: "medium", calories: 450, servings: 8, wine_pairing: None, cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: false, ingredients: &["cream cheese", "matcha", "egg", "sugar", "biscuit"] },
    // Cheeses
    MealSeed { id: "comte", course: "cheese", name: "Comte 18 Months", description: "Cooked pressed cheese from the Jura, long and fruity", tags: "french,hard,aged,fruity,mountain", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 410, servings: 4, wine_pairing: Some("Vin Jaune"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "camembert", course: "cheese", name: "Camembert de Normandie", description: "Soft bloomy-rind cheese, creamy and pungent", tags: "french,soft,creamy,strong", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "low", calories: 300, servings: 4, wine_pairing: Some("Dry cider"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "roquefort", course: "cheese", name: "Roquefort", description: "King of blues, ewe's milk, intense and creamy", tags: "french,blue,sheep,strong,creamy", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 370, servings: 4, wine_pairing: Some("Sauternes"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "chevre_frais", course: "cheese", name: "Fresh Goat Cheese", description: "Young goat cheese, lactic and delicate", tags: "french,goat,fresh,mild,creamy", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "low", calories: 280, servings: 4, wine_pairing: Some("Sancerre"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "parmesan", course: "cheese", name: "Parmigiano Reggiano", description: "Granular, crystalline and deeply umami", tags: "italian,hard,aged,umami,strong", cuisine: "italian", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "high", calories: 430, servings: 4, wine_pairing: Some("Lambrusco"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "reblochon", course: "cheese", name: "Reblochon", description: "Savoyard washed-rind, supple and nutty", tags: "french,soft,creamy,mountain", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 320, servings: 4, wine_pairing: Some("Savoie white"), cheese_pairing: None, season: "winter", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "manchego", course: "cheese", name: "Manchego", description: "Spanish ewe's cheese with a nutty finish", tags: "spanish,hard,sheep,aged,nutty", cuisine: "spanish", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 380, servings: 4, wine_pairing: Some("Rioja"), cheese_pairing: None, season: "all", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "stilton", course: "cheese", name: "Stilton", description: "English blue with a natural rind and complex depth", tags: "british,blue,strong,aged", cuisine: "british", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "high", calories: 380, servings: 4, wine_pairing: Some("Vintage port"), cheese_pairing: None, season: "winter", is_vegetarian: true, is_vegan: false, is_gluten_free: true, ingredients: &[] },
    // Wines
    MealSeed { id: "pinot_noir", course: "wine", name: "Burgundy Pinot Noir", description: "Silky red with cherry and undergrowth notes", tags: "wine_red,french,refined,classic", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "high", calories: 125, servings: 6, wine_pairing: None, cheese_pairing: Some("Brie de Meaux"), season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "chablis", course: "wine", name: "Chablis", description: "Taut mineral Chardonnay from Kimmeridgian soils", tags: "wine_white,french,mineral,refined", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 120, servings: 6, wine_pairing: None, cheese_pairing: Some("Fresh goat cheese"), season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "provence_rose", course: "wine", name: "Provence Rose", description: "Pale, dry and saline, built for summer tables", tags: "wine_rose,french,fresh,summer", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "low", calories: 115, servings: 6, wine_pairing: None, cheese_pairing: None, season: "summer", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "chianti", course: "wine", name: "Chianti Classico", description: "Sangiovese with bright cherry and firm tannin", tags: "wine_red,italian,classic", cuisine: "italian", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 125, servings: 6, wine_pairing: None, cheese_pairing: Some("Pecorino"), season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "riesling", course: "wine", name: "Alsace Riesling", description: "Dry, citrus-driven and razor precise", tags: "wine_white,french,mineral,precise", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 120, servings: 6, wine_pairing: None, cheese_pairing: Some("Munster"), season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "rioja", course: "wine", name: "Rioja Reserva", description: "Tempranillo aged in oak, vanilla and dried fruit", tags: "wine_red,spanish,aged", cuisine: "spanish", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "medium", calories: 130, servings: 6, wine_pairing: None, cheese_pairing: Some("Manchego"), season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &[] },
    MealSeed { id: "sauternes", course: "wine", name: "Sauternes", description: "Golden botrytized sweet wine, apricot and honey", tags: "wine_white,french,sweet,refined", cuisine: "french", prep_time_min: 0, cook_time_min: 0, difficulty: 1, budget: "high", calories: 160, servings: 8, wine_pairing: None, cheese_pairing: Some("Roquefort"), season: "all", is_vegetarian: true, is_vegan: true, is_gluten_free: true, ingredients: &[] },
];

impl SqliteStore {
    /// Idempotent upsert of the reference catalog. Existing rows are
    /// refreshed in place so re-running setup never breaks foreign keys
    /// from user data.
    pub fn seed_reference_data(&mut self) -> Result<SeedSummary, StoreError> {
        let tx = self.conn.transaction()?;

        for question in QUESTIONS {
            tx.execute(
                "INSERT INTO questions(id, text, category, tags) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT(id) DO UPDATE SET text=excluded.text, category=excluded.category, \
                   tags=excluded.tags",
                params![question.id, question.text, question.category, question.tags],
            )?;
        }

        for profile in PROFILES {
            tx.execute(
                "INSERT INTO profiles(id, name, description, tags, rarity) \
                 VALUES (?1, ?2, ?3, ?4, ?5) \
                 ON CONFLICT(id) DO UPDATE SET name=excluded.name, \
                   description=excluded.description, tags=excluded.tags, rarity=excluded.rarity",
                params![
                    profile.id,
                    profile.name,
                    profile.description,
                    profile.tags,
                    profile.rarity,
                ],
            )?;
        }

        for achievement in ACHIEVEMENTS {
            tx.execute(
                "INSERT INTO achievements(id, name, description, category, condition_type, \
                 condition_value, xp_reward, rarity) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
                 ON CONFLICT(id) DO UPDATE SET name=excluded.name, \
                   description=excluded.description, category=excluded.category, \
                   condition_type=excluded.condition_type, \
                   condition_value=excluded.condition_value, xp_reward=excluded.xp_reward, \
                   rarity=excluded.rarity",
                params![
                    achievement.id,
                    achievement.name,
                    achievement.description,
                    achievement.category,
                    achievement.condition_type,
                    achievement.condition_value,
                    achievement.xp_reward,
                    achievement.rarity,
                ],
            )?;
        }

        for meal in MEALS {
            upsert_meal_tx(&tx, meal)?;
        }

        tx.commit()?;

        let summary = SeedSummary {
            questions: QUESTIONS.len(),
            profiles: PROFILES.len(),
            achievements: ACHIEVEMENTS.len(),
            meals: MEALS.len(),
        };
        info!(
            questions = summary.questions,
            profiles = summary.profiles,
            achievements = summary.achievements,
            meals = summary.meals,
            "seeded reference data"
        );
        Ok(summary)
    }
}

fn upsert_meal_tx(tx: &Transaction<'_>, meal: &MealSeed) -> Result<(), StoreError> {
    let ingredients: Vec<serde_json::Value> = meal
        .ingredients
        .iter()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();
    let ingredients_json = serde_json::to_string(&ingredients)
        .map_err(|_| StoreError::InvalidInput("invalid seed ingredients"))?;

    tx.execute(
        "INSERT INTO meals(id, type, name, description, tags, cuisine, prep_time_min, \
         cook_time_min, difficulty, budget, calories, servings, wine_pairing, cheese_pairing, \
         season, is_vegetarian, is_vegan, is_gluten_free, ingredients_json) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19) \
         ON CONFLICT(id) DO UPDATE SET type=excluded.type, name=excluded.name, \
           description=excluded.description, tags=excluded.tags, cuisine=excluded.cuisine, \
           prep_time_min=excluded.prep_time_min, cook_time_min=excluded.cook_time_min, \
           difficulty=excluded.difficulty, budget=excluded.budget, calories=excluded.calories, \
           servings=excluded.servings, wine_pairing=excluded.wine_pairing, \
           cheese_pairing=excluded.cheese_pairing, season=excluded.season, \
           is_vegetarian=excluded.is_vegetarian, is_vegan=excluded.is_vegan, \
           is_gluten_free=excluded.is_gluten_free, ingredients_json=excluded.ingredients_json",
        params![
            meal.id,
            meal.course,
            meal.name,
            meal.description,
            meal.tags,
            meal.cuisine,
            meal.prep_time_min,
            meal.cook_time_min,
            meal.difficulty,
            meal.budget,
            meal.calories,
            meal.servings,
            meal.wine_pairing,
            meal.cheese_pairing,
            meal.season,
            meal.is_vegetarian,
            meal.is_vegan,
            meal.is_gluten_free,
            ingredients_json,
        ],
    )?;
    Ok(())
}
