/* ===============================================================================
Restaurant menu bot.
Dish form for the administrator. 12 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use smart_default::SmartDefault;
use strum::{AsRefStr, EnumIter, };
use thiserror::Error;

use crate::dish::*;
use crate::store::IdSource;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
   #[error("name and price are required")]
   Required,
}

// What happened to the menu after submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
   Added(DishId),
   Updated(DishId),
   Gone(DishId), // edited dish was removed meanwhile, menu unchanged
}

// Editable fields, caption of the button is the field name
#[derive(Copy, Clone, Debug, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum Field {
   #[strum(to_string = "Name")]
   Name,
   #[strum(to_string = "Description")]
   Descr,
   #[strum(to_string = "Price")]
   Price,
   #[strum(to_string = "Image")]
   Image,
   #[strum(to_string = "Course")]
   Course,
   #[strum(to_string = "Ingredients")]
   Ingredients,
}

// Unsaved form state
#[derive(Clone, Debug, PartialEq, Eq, SmartDefault)]
pub struct Draft {
   pub name: String,
   pub descr: String,
   pub price: String,
   #[default(PLACEHOLDER_IMAGE.to_owned())]
   pub image: String,
   pub course: String,
   pub ingredients: String,
   pub is_special: bool,
   pub editing: Option<DishId>,
}

impl Draft {
   pub fn get(&self, field: Field) -> &str {
      match field {
         Field::Name => &self.name,
         Field::Descr => &self.descr,
         Field::Price => &self.price,
         Field::Image => &self.image,
         Field::Course => &self.course,
         Field::Ingredients => &self.ingredients,
      }
   }

   pub fn set(&mut self, field: Field, value: String) {
      let target = match field {
         Field::Name => &mut self.name,
         Field::Descr => &mut self.descr,
         Field::Price => &mut self.price,
         Field::Image => &mut self.image,
         Field::Course => &mut self.course,
         Field::Ingredients => &mut self.ingredients,
      };
      *target = value;
   }

   pub fn toggle_special(&mut self) {
      self.is_special = !self.is_special;
   }

   // Copy the dish into the form and switch to update mode
   pub fn load_for_edit(&mut self, dish: &Dish) {
      self.name = dish.name.clone();
      self.descr = dish.descr.clone();
      self.price = dish.price.clone();
      self.image = dish.image.clone();
      self.course = dish.course.clone();
      self.ingredients = dish.ingredients.clone();
      self.is_special = dish.is_special;
      self.editing = Some(dish.id);
   }

   pub fn reset(&mut self) {
      *self = Self::default();
   }

   pub fn validate(&self) -> Result<(), DraftError> {
      if self.name.trim().is_empty() || self.price.trim().is_empty() {
         Err(DraftError::Required)
      } else {
         Ok(())
      }
   }

   // Dish from the form, the id is either the edited one or fresh
   fn to_dish(&self, id: DishId) -> Result<Dish, DraftError> {
      self.validate()?;

      let image = match self.image.trim() {
         "" => PLACEHOLDER_IMAGE,
         s => s,
      };

      Ok(Dish {
         id,
         name: self.name.trim().to_owned(),
         descr: self.descr.trim().to_owned(),
         price: self.price.trim().to_owned(),
         image: image.to_owned(),
         course: self.course.trim().to_owned(),
         ingredients: self.ingredients.trim().to_owned(),
         is_special: self.is_special,
      })
   }

   // New version of the whole menu, the draft itself stays untouched
   pub fn submit(&self, items: &[Dish], ids: &mut IdSource) -> Result<(Vec<Dish>, Submitted), DraftError> {
      match self.editing {
         Some(id) => {
            let dish = self.to_dish(id)?;

            // Replace at the same position
            if items.iter().any(|d| d.id == id) {
               let res = items.iter()
               .map(|d| if d.id == id { dish.clone() } else { d.clone() })
               .collect();
               Ok((res, Submitted::Updated(id)))
            } else {
               // Dish was removed while editing, do not bring it back
               Ok((items.to_vec(), Submitted::Gone(id)))
            }
         }
         None => {
            // Validate before taking the id
            self.validate()?;
            let id = ids.next(items);
            let dish = self.to_dish(id)?;

            let mut res = items.to_vec();
            res.push(dish);
            Ok((res, Submitted::Added(id)))
         }
      }
   }
}

pub fn remove(id: DishId, items: &[Dish]) -> Vec<Dish> {
   items.iter()
   .filter(|d| d.id != id)
   .cloned()
   .collect()
}

pub fn clear(_items: &[Dish]) -> Vec<Dish> {
   Vec::new()
}

#[cfg(test)]
mod tests {
   use super::*;

   fn ids_of(items: &[Dish]) -> Vec<DishId> {
      items.iter().map(|d| d.id).collect()
   }

   fn unique(items: &[Dish]) -> bool {
      let mut ids = ids_of(items);
      ids.sort();
      ids.windows(2).all(|w| w[0] != w[1])
   }

   #[test]
   fn add_soup_to_seed() {
      let items = seed();
      let mut ids = IdSource::after(&items);
      let draft = Draft {
         name: String::from("Soup"),
         price: String::from("15"),
         image: String::new(),
         ..Default::default()
      };

      let (res, outcome) = draft.submit(&items, &mut ids).unwrap();
      assert_eq!(res.len(), 9);
      assert!(unique(&res));
      assert_eq!(&res[..8], &items[..]);

      let last = res.last().unwrap();
      assert_eq!(outcome, Submitted::Added(last.id));
      assert_eq!(last.name, "Soup");
      assert_eq!(last.price, "15");
      assert_eq!(last.image, PLACEHOLDER_IMAGE);
      assert!(!last.is_special);
   }

   #[test]
   fn default_draft_starts_with_placeholder_image() {
      let draft = Draft::default();
      assert_eq!(draft.image, PLACEHOLDER_IMAGE);
      assert!(draft.name.is_empty());
      assert!(!draft.is_special);
      assert_eq!(draft.editing, None);
   }

   #[test]
   fn edit_price_of_nachos() {
      let items = seed();
      let mut ids = IdSource::after(&items);
      let mut draft = Draft::default();
      draft.load_for_edit(&items[1]);
      draft.set(Field::Price, String::from("45"));

      let (res, outcome) = draft.submit(&items, &mut ids).unwrap();
      assert_eq!(outcome, Submitted::Updated(2));
      assert_eq!(res.len(), 8);
      assert_eq!(ids_of(&res), ids_of(&items));

      let nachos = &res[1];
      assert_eq!(nachos.price, "45");
      assert_eq!(Dish { price: String::from("40"), ..nachos.clone() }, items[1]);
      for (i, dish) in res.iter().enumerate().filter(|(i, _)| *i != 1) {
         assert_eq!(dish, &items[i]);
      }
   }

   #[test]
   fn empty_name_blocks_submit() {
      let items = seed();
      let mut ids = IdSource::after(&items);
      let draft = Draft {
         name: String::new(),
         price: String::from("10"),
         ..Default::default()
      };
      let before = draft.clone();

      assert_eq!(draft.submit(&items, &mut ids), Err(DraftError::Required));
      assert_eq!(draft, before);

      // Failed attempt does not burn an id
      assert_eq!(ids.next(&items), 9);
   }

   #[test]
   fn whitespace_is_not_a_value() {
      let items = seed();
      let mut ids = IdSource::after(&items);
      let draft = Draft {
         name: String::from("Tea"),
         price: String::from("  \t"),
         ..Default::default()
      };
      assert_eq!(draft.submit(&items, &mut ids), Err(DraftError::Required));

      let draft = Draft {
         name: String::from("   "),
         price: String::from("5"),
         ..Default::default()
      };
      assert_eq!(draft.submit(&items, &mut ids), Err(DraftError::Required));
   }

   #[test]
   fn fields_are_trimmed_on_submit() {
      let mut ids = IdSource::after(&[]);
      let draft = Draft {
         name: String::from("  Tea "),
         descr: String::from(" hot "),
         price: String::from(" 5 "),
         image: String::from(" http://x/y.png "),
         course: String::from(" Drinks"),
         ingredients: String::new(),
         is_special: true,
         editing: None,
      };

      let (res, _) = draft.submit(&[], &mut ids).unwrap();
      let tea = &res[0];
      assert_eq!(tea.name, "Tea");
      assert_eq!(tea.descr, "hot");
      assert_eq!(tea.price, "5");
      assert_eq!(tea.image, "http://x/y.png");
      assert_eq!(tea.course, "Drinks");
      assert!(tea.ingredients.is_empty());
      assert!(tea.is_special);
   }

   #[test]
   fn load_for_edit_copies_every_field() {
      let items = seed();
      for dish in &items {
         let mut draft = Draft::default();
         draft.load_for_edit(dish);
         assert_eq!(draft.name, dish.name);
         assert_eq!(draft.descr, dish.descr);
         assert_eq!(draft.price, dish.price);
         assert_eq!(draft.image, dish.image);
         assert_eq!(draft.course, dish.course);
         assert_eq!(draft.ingredients, dish.ingredients);
         assert_eq!(draft.is_special, dish.is_special);
         assert_eq!(draft.editing, Some(dish.id));
      }
   }

   #[test]
   fn update_of_removed_dish_keeps_menu() {
      let items = seed();
      let mut ids = IdSource::after(&items);
      let mut draft = Draft::default();
      draft.load_for_edit(&items[2]);
      draft.set(Field::Price, String::from("65"));

      let items = remove(3, &items);
      let (res, outcome) = draft.submit(&items, &mut ids).unwrap();
      assert_eq!(outcome, Submitted::Gone(3));
      assert_eq!(res, items);
      assert_eq!(ids_of(&res), vec![1, 2, 4, 5, 6, 7, 8]);
   }

   #[test]
   fn reset_clears_editing_mark() {
      let mut draft = Draft::default();
      draft.load_for_edit(&seed()[0]);
      draft.toggle_special();
      draft.reset();
      assert_eq!(draft, Draft::default());
   }

   #[test]
   fn remove_keeps_order_of_others() {
      let items = seed();
      let res = remove(4, &items);
      assert_eq!(res.len(), 7);
      assert_eq!(ids_of(&res), vec![1, 2, 3, 5, 6, 7, 8]);

      // Unknown id changes nothing
      assert_eq!(remove(100, &items), items);
   }

   #[test]
   fn clear_empties_menu() {
      assert!(clear(&seed()).is_empty());
   }
}
