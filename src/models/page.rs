// src/models/page.rs

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Canonical pagination envelope. Every listing endpoint returns exactly this
/// shape; any legacy field-name variant belongs in an adapter at the HTTP
/// boundary, not here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page: i64,
  pub page_size: i64,
  pub total_items: i64,
  pub total_pages: i64,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, params: PageParams, total_items: i64) -> Self {
    let total_pages = if total_items == 0 {
      0
    } else {
      (total_items + params.page_size - 1) / params.page_size
    };
    Self {
      items,
      page: params.page,
      page_size: params.page_size,
      total_items,
      total_pages,
    }
  }
}

/// Query-string pagination parameters, `?page=&pageSize=`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageParams {
  pub page: i64,
  pub page_size: i64,
}

impl Default for PageParams {
  fn default() -> Self {
    Self {
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

impl PageParams {
  /// Out-of-range values are clamped rather than rejected.
  pub fn clamped(self) -> Self {
    Self {
      page: self.page.max(1),
      page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
    }
  }

  pub fn offset(self) -> i64 {
    (self.page - 1) * self.page_size
  }
}
