/* ===============================================================================
Restaurant menu bot.
Menu collection for the session. 12 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::dish::*;

// Source of fresh dish ids
#[derive(Debug)]
pub struct IdSource {
   next: DishId,
}

impl IdSource {
   // Start after the largest known id
   pub fn after(items: &[Dish]) -> Self {
      let max = items.iter().map(|d| d.id).max().unwrap_or_default();
      Self { next: max + 1 }
   }

   // Never returns an id present in the items
   pub fn next(&mut self, items: &[Dish]) -> DishId {
      let max = items.iter().map(|d| d.id).max().unwrap_or_default();
      let id = self.next.max(max + 1);
      self.next = id + 1;
      id
   }
}

struct Menu {
   items: Vec<Dish>,
   ids: IdSource,
}

// Menu shared by all chats, the only writer entry is the replacement of whole collection
pub struct Store {
   menu: Mutex<Menu>,
}

impl Store {
   pub fn new(items: Vec<Dish>) -> Self {
      let ids = IdSource::after(&items);
      Self {
         menu: Mutex::new(Menu { items, ids }),
      }
   }

   // A panic in another chat must not block the menu
   fn lock(&self) -> MutexGuard<'_, Menu> {
      self.menu.lock().unwrap_or_else(PoisonError::into_inner)
   }

   pub fn items(&self) -> Vec<Dish> {
      self.lock().items.clone()
   }

   pub fn specials(&self) -> Vec<Dish> {
      specials(&self.lock().items)
   }

   pub fn find(&self, id: DishId) -> Option<Dish> {
      self.lock().items.iter().find(|d| d.id == id).cloned()
   }

   pub fn len(&self) -> usize {
      self.lock().items.len()
   }

   pub fn replace_all(&self, items: Vec<Dish>) {
      log::debug!("store::replace_all {} dishes", items.len());
      self.lock().items = items;
   }

   // Computes the new collection under the lock so that concurrent chats do not lose changes
   pub fn transact<F, R, E>(&self, f: F) -> Result<R, E>
   where F: FnOnce(&[Dish], &mut IdSource) -> Result<(Vec<Dish>, R), E>
   {
      let mut menu = self.lock();
      let Menu { items, ids } = &mut *menu;
      let (new_items, res) = f(items.as_slice(), ids)?;
      log::debug!("store::transact {} -> {} dishes", items.len(), new_items.len());
      *items = new_items;
      Ok(res)
   }
}

// Chef specials in menu order
pub fn specials(items: &[Dish]) -> Vec<Dish> {
   items.iter()
   .filter(|d| d.is_special)
   .cloned()
   .collect()
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn seed_specials_are_cheeseburger_and_ribs() {
      let store = Store::new(seed());
      let specials = store.specials();

      let names: Vec<&str> = specials.iter().map(|d| d.name.as_str()).collect();
      assert_eq!(names, vec!["Cheeseburger", "BBQ Ribs"]);
      let ids: Vec<DishId> = specials.iter().map(|d| d.id).collect();
      assert_eq!(ids, vec![3, 4]);
   }

   #[test]
   fn specials_keep_relative_order_and_are_subset() {
      let mut items = seed();
      items[7].is_special = true;
      items[0].is_special = true;
      items[3].is_special = false;

      let res = specials(&items);
      let ids: Vec<DishId> = res.iter().map(|d| d.id).collect();
      assert_eq!(ids, vec![1, 3, 8]);
      assert!(res.iter().all(|d| items.contains(d)));
      assert!(specials(&[]).is_empty());
   }

   #[test]
   fn replace_all_is_visible_to_readers() {
      let store = Store::new(seed());
      store.replace_all(Vec::new());
      assert_eq!(store.len(), 0);
      assert!(store.find(1).is_none());

      store.replace_all(seed().into_iter().take(2).collect());
      assert_eq!(store.items().len(), 2);
      assert_eq!(store.find(2).map(|d| d.name), Some(String::from("Nachos")));
   }

   #[test]
   fn ids_do_not_collide() {
      let items = seed();
      let mut ids = IdSource::after(&items);
      assert_eq!(ids.next(&items), 9);
      assert_eq!(ids.next(&items), 10);

      // Somebody appended a dish with a large id
      let mut items = items;
      items.push(Dish { id: 42, ..items[0].clone() });
      assert_eq!(ids.next(&items), 43);

      // Empty menu still moves forward
      assert_eq!(ids.next(&[]), 44);
   }

   #[test]
   fn failed_transaction_keeps_items() {
      let store = Store::new(seed());
      let res: Result<(), &str> = store.transact(|_, _| Err("no"));
      assert!(res.is_err());
      assert_eq!(store.len(), 8);

      let id = store.transact(|items, ids| {
         let mut items = items.to_vec();
         let id = ids.next(&items);
         items.push(Dish { id, ..items[0].clone() });
         Ok::<_, ()>((items, id))
      });
      assert_eq!(id, Ok(9));
      assert_eq!(store.len(), 9);
   }
}
