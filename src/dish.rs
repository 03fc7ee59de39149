/* ===============================================================================
Restaurant menu bot.
Menu item. 14 May 2021.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

pub type DishId = i64;

// Picture for dishes without own image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

// Bigger one for the dish card
pub const CARD_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

// Shown instead of empty ingredients
pub const INGREDIENTS_FALLBACK: &str = "Chef’s secret!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dish {
   pub id: DishId,
   pub name: String,
   pub descr: String,
   pub price: String, // as entered, no currency
   pub image: String,
   pub course: String,
   pub ingredients: String,
   pub is_special: bool,
}

impl Dish {
   pub fn ingredients_or_fallback(&self) -> &str {
      if self.ingredients.is_empty() {
         INGREDIENTS_FALLBACK
      } else {
         self.ingredients.as_str()
      }
   }

   pub fn image_or_placeholder(&self) -> &str {
      if self.image.is_empty() {
         CARD_PLACEHOLDER_IMAGE
      } else {
         self.image.as_str()
      }
   }
}

fn make(id: DishId, name: &str, descr: &str, price: &str, image: &str, course: &str, ingredients: &str, is_special: bool) -> Dish {
   Dish {
      id,
      name: String::from(name),
      descr: String::from(descr),
      price: String::from(price),
      image: String::from(image),
      course: String::from(course),
      ingredients: String::from(ingredients),
      is_special,
   }
}

// Initial menu for the new session
pub fn seed() -> Vec<Dish> {
   vec![
      make(1, "Buffalo Wings",
         "Spicy chicken wings tossed in buffalo sauce, served with celery and blue cheese dip.",
         "50",
         "https://images.unsplash.com/photo-1567620832903-9fc6debc209f?w=150",
         "Appetizer",
         "Chicken Wings, Buffalo Sauce, Celery, Blue Cheese",
         false),
      make(2, "Nachos",
         "Tortilla chips topped with melted cheese, jalapeños, tomatoes, and sour cream.",
         "40",
         "https://images.unsplash.com/photo-1513456852971-30c0b8199d4d?w=150",
         "Appetizer",
         "Tortilla Chips, Cheese, Jalapeños, Tomatoes, Sour Cream",
         false),
      make(3, "Cheeseburger",
         "Juicy beef patty with melted cheese, lettuce, tomato, and pickles on a bun.",
         "60",
         "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=150",
         "Main",
         "Beef Patty, Cheese, Lettuce, Tomato, Pickles, Bun",
         true),
      make(4, "BBQ Ribs",
         "Tender pork ribs slow-cooked and glazed with smoky BBQ sauce.",
         "70",
         "https://images.unsplash.com/photo-1544025162-d76694265947?w=150",
         "Main",
         "Pork Ribs, BBQ Sauce, Spices",
         true),
      make(5, "Apple Pie",
         "Classic American pie filled with cinnamon-spiced apples and a flaky crust.",
         "25",
         "https://images.unsplash.com/photo-1565958011703-44f9829ba187?w=150",
         "Dessert",
         "Apples, Cinnamon, Sugar, Pie Crust",
         false),
      make(6, "Cheesecake",
         "Creamy cheesecake with a graham cracker crust, topped with strawberry sauce.",
         "30",
         "https://images.unsplash.com/photo-1533134242443-d4fd215305ad?w=150",
         "Dessert",
         "Cream Cheese, Sugar, Graham Crackers, Strawberries",
         false),
      make(7, "Chocolate Chip Cookies",
         "Soft and chewy cookies loaded with chocolate chips.",
         "20",
         "https://images.unsplash.com/photo-1499636136210-6f4ee915583e?w=150",
         "Dessert",
         "Flour, Butter, Chocolate Chips, Sugar",
         false),
      make(8, "Ice Cream Sundae",
         "Vanilla ice cream topped with chocolate syrup, whipped cream, and a cherry.",
         "35",
         "https://images.unsplash.com/photo-1567206563064-6f60f40a2b57?w=150",
         "Dessert",
         "Vanilla Ice Cream, Chocolate Syrup, Whipped Cream, Cherry",
         false),
   ]
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn seed_has_unique_ids() {
      let menu = seed();
      assert_eq!(menu.len(), 8);

      let mut ids: Vec<DishId> = menu.iter().map(|d| d.id).collect();
      ids.dedup();
      assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
   }

   #[test]
   fn empty_ingredients_fall_back_only_on_display() {
      let mut dish = seed().remove(0);
      dish.ingredients.clear();
      assert_eq!(dish.ingredients_or_fallback(), INGREDIENTS_FALLBACK);
      assert!(dish.ingredients.is_empty());

      dish.image.clear();
      assert_eq!(dish.image_or_placeholder(), CARD_PLACEHOLDER_IMAGE);
      assert_eq!(dish.image_or_placeholder(), "https://via.placeholder.com/300");
   }
}
