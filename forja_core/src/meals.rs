//! Meal plan operations.
//!
//! Each day of the week holds an ordered list of meals with their macro
//! content. These are the data-layer operations behind the planner UI;
//! totals are compared against the profile's macro targets by the caller.

use crate::types::{DayMealPlan, DayOfWeek, MacroTarget, Meal, MealType, UserFitnessState};
use uuid::Uuid;

/// Build a meal with a fresh id
pub fn new_meal(
    name: &str,
    meal_type: MealType,
    calories: i32,
    protein: i32,
    carbs: i32,
    fat: i32,
    order: u32,
) -> Meal {
    Meal {
        id: format!("m-{}", Uuid::new_v4()),
        name: name.to_string(),
        meal_type,
        calories,
        protein,
        carbs,
        fat,
        order,
    }
}

/// The meal plan for a day
///
/// The default state carries all seven days; a missing day reads as empty.
pub fn meals_for_day(state: &UserFitnessState, day: DayOfWeek) -> &[Meal] {
    state
        .meal_plans
        .iter()
        .find(|plan| plan.day == day)
        .map(|plan| plan.meals.as_slice())
        .unwrap_or(&[])
}

fn day_plan_mut(state: &mut UserFitnessState, day: DayOfWeek) -> &mut DayMealPlan {
    let index = match state.meal_plans.iter().position(|plan| plan.day == day) {
        Some(index) => index,
        None => {
            state.meal_plans.push(DayMealPlan {
                day,
                meals: Vec::new(),
            });
            state.meal_plans.len() - 1
        }
    };
    &mut state.meal_plans[index]
}

/// Append a meal to a day, assigning it the next order index
pub fn add_meal(state: &mut UserFitnessState, day: DayOfWeek, mut meal: Meal) {
    let plan = day_plan_mut(state, day);
    meal.order = plan.meals.len() as u32;
    plan.meals.push(meal);
}

/// Apply an update to a meal in place; false when the id is unknown
pub fn update_meal<F>(state: &mut UserFitnessState, day: DayOfWeek, meal_id: &str, f: F) -> bool
where
    F: FnOnce(&mut Meal),
{
    let plan = day_plan_mut(state, day);
    match plan.meals.iter_mut().find(|meal| meal.id == meal_id) {
        Some(meal) => {
            f(meal);
            true
        }
        None => false,
    }
}

/// Remove a meal from a day; false when the id is unknown
pub fn delete_meal(state: &mut UserFitnessState, day: DayOfWeek, meal_id: &str) -> bool {
    let plan = day_plan_mut(state, day);
    let before = plan.meals.len();
    plan.meals.retain(|meal| meal.id != meal_id);
    plan.meals.len() != before
}

/// Reorder a day's meals to match the given id sequence
///
/// Ids not present in the day are dropped from the sequence, meals not
/// mentioned are removed, and order indexes are reassigned by position.
pub fn reorder_meals(state: &mut UserFitnessState, day: DayOfWeek, meal_ids: &[String]) {
    let plan = day_plan_mut(state, day);
    let ordered: Vec<Meal> = meal_ids
        .iter()
        .enumerate()
        .filter_map(|(index, id)| {
            plan.meals.iter().find(|meal| &meal.id == id).map(|meal| {
                let mut meal = meal.clone();
                meal.order = index as u32;
                meal
            })
        })
        .collect();
    plan.meals = ordered;
}

/// Sum of the macro content of a day's meals
pub fn day_totals(plan: &DayMealPlan) -> MacroTarget {
    plan.meals.iter().fold(
        MacroTarget {
            calories: 0,
            protein: 0,
            carbs: 0,
            fat: 0,
        },
        |acc, meal| MacroTarget {
            calories: acc.calories + meal.calories,
            protein: acc.protein + meal.protein,
            carbs: acc.carbs + meal.carbs,
            fat: acc.fat + meal.fat,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(name: &str) -> Meal {
        new_meal(name, MealType::Lunch, 500, 40, 50, 15, 0)
    }

    #[test]
    fn test_add_meal_assigns_sequential_order() {
        let mut state = UserFitnessState::default();
        add_meal(&mut state, DayOfWeek::Lunes, meal("Pollo con arroz"));
        add_meal(&mut state, DayOfWeek::Lunes, meal("Avena"));

        let meals = meals_for_day(&state, DayOfWeek::Lunes);
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].order, 0);
        assert_eq!(meals[1].order, 1);

        // Other days untouched
        assert!(meals_for_day(&state, DayOfWeek::Martes).is_empty());
    }

    #[test]
    fn test_update_meal_in_place() {
        let mut state = UserFitnessState::default();
        add_meal(&mut state, DayOfWeek::Lunes, meal("Avena"));
        let id = meals_for_day(&state, DayOfWeek::Lunes)[0].id.clone();

        let updated = update_meal(&mut state, DayOfWeek::Lunes, &id, |m| {
            m.calories = 620;
        });
        assert!(updated);
        assert_eq!(meals_for_day(&state, DayOfWeek::Lunes)[0].calories, 620);

        assert!(!update_meal(&mut state, DayOfWeek::Lunes, "m-missing", |_| {}));
    }

    #[test]
    fn test_delete_meal() {
        let mut state = UserFitnessState::default();
        add_meal(&mut state, DayOfWeek::Viernes, meal("Cena ligera"));
        let id = meals_for_day(&state, DayOfWeek::Viernes)[0].id.clone();

        assert!(delete_meal(&mut state, DayOfWeek::Viernes, &id));
        assert!(meals_for_day(&state, DayOfWeek::Viernes).is_empty());
        assert!(!delete_meal(&mut state, DayOfWeek::Viernes, &id));
    }

    #[test]
    fn test_reorder_meals_reassigns_positions() {
        let mut state = UserFitnessState::default();
        add_meal(&mut state, DayOfWeek::Lunes, meal("Desayuno"));
        add_meal(&mut state, DayOfWeek::Lunes, meal("Almuerzo"));
        add_meal(&mut state, DayOfWeek::Lunes, meal("Cena"));

        let ids: Vec<String> = meals_for_day(&state, DayOfWeek::Lunes)
            .iter()
            .map(|m| m.id.clone())
            .collect();

        // Reverse, and sneak in an unknown id that must be dropped
        let new_order = vec![ids[2].clone(), "m-ghost".to_string(), ids[0].clone()];
        reorder_meals(&mut state, DayOfWeek::Lunes, &new_order);

        let meals = meals_for_day(&state, DayOfWeek::Lunes);
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].name, "Cena");
        assert_eq!(meals[0].order, 0);
        assert_eq!(meals[1].name, "Desayuno");
        assert_eq!(meals[1].order, 2);
    }

    #[test]
    fn test_day_totals() {
        let mut state = UserFitnessState::default();
        add_meal(&mut state, DayOfWeek::Lunes, meal("Pollo con arroz"));
        add_meal(&mut state, DayOfWeek::Lunes, meal("Avena"));

        let plan = state
            .meal_plans
            .iter()
            .find(|p| p.day == DayOfWeek::Lunes)
            .unwrap();
        let totals = day_totals(plan);
        assert_eq!(totals.calories, 1000);
        assert_eq!(totals.protein, 80);
        assert_eq!(totals.carbs, 100);
        assert_eq!(totals.fat, 30);
    }
}
