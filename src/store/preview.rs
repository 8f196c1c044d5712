use crate::RecipeDraft;

/// Sample recipes used to populate preview stores.
pub(super) fn sample_drafts() -> Vec<RecipeDraft> {
    vec![
        RecipeDraft::new("Borscht")
            .with_ingredients("beetroot, cabbage, potatoes, beef")
            .with_instructions("Simmer the beef, then add the vegetables")
            .with_tags("soup, traditional, ukrainian"),
        RecipeDraft::new("Pasta Carbonara")
            .with_ingredients("pasta, eggs, bacon, cheese")
            .with_instructions("Boil the pasta, fry the bacon")
            .with_tags("italian, pasta, quick"),
        RecipeDraft::new("Caesar Salad")
            .with_ingredients("lettuce, chicken, croutons, dressing")
            .with_instructions("Chop the ingredients and dress")
            .with_tags("salad, light, healthy"),
        RecipeDraft::new("Pizza Margherita")
            .with_ingredients("dough, tomatoes, mozzarella, basil")
            .with_instructions("Roll out the dough, add the toppings")
            .with_tags("pizza, italian, vegetarian"),
        RecipeDraft::new("Chocolate Cake")
            .with_ingredients("flour, cocoa, sugar, eggs")
            .with_instructions("Mix the ingredients and bake")
            .with_tags("dessert, sweet, chocolate"),
    ]
}
