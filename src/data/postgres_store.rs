use crate::{
    config::DbConfig,
    data::{
        MemberForm, RegistrationStore, TeamId,
        member::MEMBER_COLUMN_NAMES,
    },
    error::{
        CommitTransactionSnafu, CreateTeamSnafu, GetDatabaseConnectionSnafu, InsertMembersSnafu,
        MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu, RegistrationError, RegistrationResult,
        RollbackTransactionSnafu,
    },
};
use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::{
    PgConnection, Pool, Postgres, QueryBuilder, Transaction, pool::PoolConnection,
    postgres::PgPoolOptions,
};

#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub async fn new(db_config: &DbConfig) -> RegistrationResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections())
            .connect(&db_config.get_db_path())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }

    pub async fn get_connection(&self) -> RegistrationResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }

    pub async fn get_transaction(&self) -> RegistrationResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.context(GetDatabaseConnectionSnafu)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn insert_members(
        members: &[MemberForm],
        team_id: Option<TeamId>,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO public.members ({}, team_id) ",
            MEMBER_COLUMN_NAMES.join(", ")
        ));
        builder.push_values(members, |mut row, member| {
            for value in member.member_columns() {
                row.push_bind(value.to_owned());
            }
            row.push_bind(team_id);
        });

        builder.build().execute(conn).await?;
        Ok(())
    }

    async fn insert_team(team_name: &str, conn: &mut PgConnection) -> RegistrationResult<TeamId> {
        match sqlx::query_scalar::<_, TeamId>(
            "INSERT INTO public.teams (team_name) VALUES ($1) RETURNING id",
        )
        .bind(team_name)
        .fetch_one(conn)
        .await
        {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Err(RegistrationError::DuplicateTeamName {
                    team_name: team_name.to_string(),
                })
            }
            Err(source) => Err(source).context(CreateTeamSnafu { team_name }),
        }
    }
}

#[async_trait]
impl RegistrationStore for PostgresStore {
    async fn find_team_by_name(&self, team_name: &str) -> RegistrationResult<Option<TeamId>> {
        sqlx::query_scalar::<_, TeamId>(
            "SELECT id FROM public.teams WHERE team_name = $1 LIMIT 1",
        )
        .bind(team_name)
        .fetch_optional(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)
    }

    async fn insert_solo_member(&self, member: &MemberForm) -> RegistrationResult<()> {
        Self::insert_members(
            std::slice::from_ref(member),
            None,
            &mut *self.get_connection().await?,
        )
        .await
        .context(InsertMembersSnafu { count: 1_usize })
    }

    async fn register_team(
        &self,
        team_name: &str,
        members: &[MemberForm],
    ) -> RegistrationResult<TeamId> {
        let mut tx = self.get_transaction().await?;

        let team_id = match Self::insert_team(team_name, &mut tx).await {
            Ok(id) => id,
            Err(e) => {
                tx.rollback().await.context(RollbackTransactionSnafu)?;
                return Err(e);
            }
        };

        if let Err(source) = Self::insert_members(members, Some(team_id), &mut tx).await {
            //dropping the team row with the members means no orphaned teams
            tx.rollback().await.context(RollbackTransactionSnafu)?;
            return Err(source).context(InsertMembersSnafu {
                count: members.len(),
            });
        }

        tx.commit().await.context(CommitTransactionSnafu)?;
        Ok(team_id)
    }

    async fn health_check(&self) -> RegistrationResult<()> {
        sqlx::query("SELECT 1")
            .execute(&mut *self.get_connection().await?)
            .await
            .context(MakeQuerySnafu)?;
        Ok(())
    }
}
