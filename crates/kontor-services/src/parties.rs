//! User, client, supplier, and employee services.

use chrono::Utc;
use uuid::Uuid;

use kontor_core::{
  Error, Result,
  entity::IndexValue,
  kind::EntityKind,
  parties::{
    Client, ClientPatch, Employee, EmployeePatch, NewClient, NewEmployee,
    NewSupplier, NewUser, Supplier, SupplierPatch, User, UserPatch, UserRole,
  },
  store::DocumentStore,
};

// ─── Users ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct UserService<S> {
  store: S,
}

impl<S: DocumentStore> UserService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewUser) -> Result<User> {
    let user = input.build(Utc::now());
    self.store.create(user.clone()).await?;
    Ok(user)
  }

  pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User> {
    let mut user: User = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Users, id))?;
    patch.apply(&mut user);
    user.updated_at = Utc::now();
    self.store.replace(user.clone()).await?;
    Ok(user)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Users, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<User>> { self.store.get_all().await }

  /// Look an account up by its unique email.
  pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
    let mut matches: Vec<User> =
      self.store.get_by_index("email", IndexValue::from(email)).await?;
    Ok(matches.pop())
  }

  pub async fn get_by_role(&self, role: UserRole) -> Result<Vec<User>> {
    self.store.get_by_index("role", IndexValue::from(role.as_str())).await
  }
}

// ─── Clients ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ClientService<S> {
  store: S,
}

impl<S: DocumentStore> ClientService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewClient) -> Result<Client> {
    let client = input.build(Utc::now());
    self.store.create(client.clone()).await?;
    Ok(client)
  }

  pub async fn update(&self, id: Uuid, patch: ClientPatch) -> Result<Client> {
    let mut client: Client = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Clients, id))?;
    patch.apply(&mut client);
    client.updated_at = Utc::now();
    self.store.replace(client.clone()).await?;
    Ok(client)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Clients, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Client>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Client>> {
    self.store.get_all().await
  }

  /// Look a client up by its unique tax document.
  pub async fn get_by_document(&self, document: &str) -> Result<Option<Client>> {
    let mut matches: Vec<Client> = self
      .store
      .get_by_index("document", IndexValue::from(document))
      .await?;
    Ok(matches.pop())
  }

  pub async fn get_active(&self) -> Result<Vec<Client>> {
    let mut clients: Vec<Client> = self.store.get_all().await?;
    clients.retain(|c| c.active);
    Ok(clients)
  }
}

// ─── Suppliers ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SupplierService<S> {
  store: S,
}

impl<S: DocumentStore> SupplierService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewSupplier) -> Result<Supplier> {
    let supplier = input.build(Utc::now());
    self.store.create(supplier.clone()).await?;
    Ok(supplier)
  }

  pub async fn update(&self, id: Uuid, patch: SupplierPatch) -> Result<Supplier> {
    let mut supplier: Supplier = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Suppliers, id))?;
    patch.apply(&mut supplier);
    supplier.updated_at = Utc::now();
    self.store.replace(supplier.clone()).await?;
    Ok(supplier)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Suppliers, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Supplier>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Supplier>> {
    self.store.get_all().await
  }

  pub async fn get_by_document(
    &self,
    document: &str,
  ) -> Result<Option<Supplier>> {
    let mut matches: Vec<Supplier> = self
      .store
      .get_by_index("document", IndexValue::from(document))
      .await?;
    Ok(matches.pop())
  }
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct EmployeeService<S> {
  store: S,
}

impl<S: DocumentStore> EmployeeService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewEmployee) -> Result<Employee> {
    let employee = input.build(Utc::now());
    self.store.create(employee.clone()).await?;
    Ok(employee)
  }

  pub async fn update(&self, id: Uuid, patch: EmployeePatch) -> Result<Employee> {
    let mut employee: Employee = self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(EntityKind::Employees, id))?;
    patch.apply(&mut employee);
    employee.updated_at = Utc::now();
    self.store.replace(employee.clone()).await?;
    Ok(employee)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(EntityKind::Employees, id).await
  }

  pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
    self.store.get(id).await
  }

  pub async fn get_all(&self) -> Result<Vec<Employee>> {
    self.store.get_all().await
  }

  pub async fn get_by_document(
    &self,
    document: &str,
  ) -> Result<Option<Employee>> {
    let mut matches: Vec<Employee> = self
      .store
      .get_by_index("document", IndexValue::from(document))
      .await?;
    Ok(matches.pop())
  }

  pub async fn get_by_department(
    &self,
    department: &str,
  ) -> Result<Vec<Employee>> {
    self
      .store
      .get_by_index("department", IndexValue::from(department))
      .await
  }

  pub async fn get_active(&self) -> Result<Vec<Employee>> {
    self.store.get_by_index("active", IndexValue::from(true)).await
  }
}
