#![forbid(unsafe_code)]

/// Overlap between a dish's ingredient list and the fridge contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngredientMatch {
    pub matched: Vec<String>,
    pub total_ingredients: usize,
}

impl IngredientMatch {
    pub fn count(&self) -> usize {
        self.matched.len()
    }

    pub fn percent(&self) -> u32 {
        if self.total_ingredients == 0 {
            return 0;
        }
        ((self.count() as f64 / self.total_ingredients as f64) * 100.0).round() as u32
    }
}

/// Case-insensitive substring match in either direction ("tomato" in the
/// fridge matches "cherry tomatoes" on the dish, and vice versa). Each
/// ingredient counts at most once.
pub fn match_ingredients(ingredients: &[String], fridge: &[String]) -> IngredientMatch {
    let fridge: Vec<String> = fridge.iter().map(|item| item.to_lowercase()).collect();
    let mut matched = Vec::new();
    for ingredient in ingredients {
        let needle = ingredient.to_lowercase();
        if fridge
            .iter()
            .any(|item| needle.contains(item.as_str()) || item.contains(needle.as_str()))
        {
            matched.push(ingredient.clone());
        }
    }
    IngredientMatch {
        matched,
        total_ingredients: ingredients.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn substring_matches_both_directions() {
        let result = match_ingredients(
            &strings(&["Cherry tomatoes", "basil", "mozzarella"]),
            &strings(&["tomato", "Basil leaves"]),
        );
        assert_eq!(result.matched, strings(&["Cherry tomatoes", "basil"]));
        assert_eq!(result.count(), 2);
        assert_eq!(result.total_ingredients, 3);
        assert_eq!(result.percent(), 67);
    }

    #[test]
    fn each_ingredient_counts_once() {
        let result = match_ingredients(
            &strings(&["tomato"]),
            &strings(&["tomato", "cherry tomato"]),
        );
        assert_eq!(result.count(), 1);
    }

    #[test]
    fn empty_inputs_are_zero() {
        assert_eq!(match_ingredients(&[], &strings(&["milk"])).percent(), 0);
        assert_eq!(
            match_ingredients(&strings(&["milk"]), &[]).count(),
            0
        );
    }
}
